use clap::{Parser, Subcommand, ValueEnum};
use folio::filter::{self, Category};
use folio::preference::{LanguageContext, PreferenceStore};
use folio::source::{ContentSource, FsSource, Fetched, fetch, fetch_all};
use folio::types::Language;
use folio::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Bilingual portfolio and blog site generator")]
#[command(long_about = "\
Bilingual portfolio and blog site generator

Content is a directory of JSON documents. Every page is rendered once in
Vietnamese and once in English, under /vi/ and /en/.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── translations.json            # UI strings: { \"vi\": {...}, \"en\": {...} }
  ├── profile.json                 # Name, role, contacts, experience
  ├── projects.json                # Array of projects
  └── posts/                       # One JSON document per post
      ├── hello-world.json         # Portable-text or markdown body per language
      └── 2024/
          └── rust-notes.json      # Subdirectories are walked too

Localized fields are either a plain string or { \"vi\": \"...\", \"en\": \"...\" }.
A missing translation renders empty; run 'folio check' to find the gaps.

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for persisted preferences
    #[arg(long, default_value = ".folio", global = true)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Posts,
    Projects,
}

#[derive(Subcommand)]
enum Command {
    /// Render the whole site into the output directory
    Build,
    /// Validate the content directory and report translation gaps
    Check,
    /// List posts or projects, filtered by tag and search term
    List {
        #[arg(value_enum)]
        kind: Kind,
        /// Only items carrying this tag ("all" for no filter)
        #[arg(long, default_value = filter::ALL)]
        tag: String,
        /// Case-insensitive text matched against title, summary and tags
        #[arg(long, default_value = "")]
        search: String,
        /// Language to resolve titles in (defaults to the saved preference)
        #[arg(long)]
        lang: Option<Language>,
    },
    /// Show or change the preferred language
    Lang {
        /// `vi` or `en`; omit to print the current preference
        code: Option<Language>,
    },
    /// Print one post as plain text
    Show {
        slug: String,
        #[arg(long)]
        lang: Option<Language>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("folio=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let ctx = language_context(&cli.state_dir, &site_config);
            let source = FsSource::new(&cli.source);
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&source, &site_config, ctx.language(), &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let source = FsSource::new(&cli.source);
            let problems = source.validate()?;
            let posts = source.all_posts()?;
            let projects = source.projects()?;
            let translations = source.translations()?;
            let has_config = cli.source.join("config.toml").is_file();
            output::print_check_output(&posts, &projects, &translations, &problems, has_config);
            if !problems.is_empty() {
                return Err(format!("{} problem(s) found", problems.len()).into());
            }
            println!("==> Content is valid");
        }
        Command::List {
            kind,
            tag,
            search,
            lang,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let language =
                lang.unwrap_or_else(|| language_context(&cli.state_dir, &site_config).language());
            let source = FsSource::new(&cli.source);
            let category = Category::from(tag.as_str());
            match kind {
                Kind::Posts => {
                    let posts = fetch_all("posts", source.all_posts())
                        .found()
                        .unwrap_or_default();
                    let matched = filter::filter(&posts, &category, &search, language);
                    output::print_listing(&matched, language);
                }
                Kind::Projects => {
                    let projects = fetch_all("projects", source.projects())
                        .found()
                        .unwrap_or_default();
                    let matched = filter::filter(&projects, &category, &search, language);
                    output::print_listing(&matched, language);
                }
            }
        }
        Command::Lang { code } => {
            let site_config = config::load_config(&cli.source)?;
            let mut ctx = language_context(&cli.state_dir, &site_config);
            match code {
                None => println!("{} ({})", ctx.language(), ctx.language().native_name()),
                Some(language) => {
                    ctx.subscribe(|l| println!("==> Language changed to {} ({})", l, l.native_name()));
                    ctx.set_language(language)?;
                    println!("{}", ctx.language());
                }
            }
        }
        Command::Show { slug, lang } => {
            let site_config = config::load_config(&cli.source)?;
            let language =
                lang.unwrap_or_else(|| language_context(&cli.state_dir, &site_config).language());
            let source = FsSource::new(&cli.source);
            match fetch("post", source.post_by_slug(&slug)) {
                Fetched::Found(post) => output::print_post(&post, language),
                Fetched::NotFound => return Err(format!("post '{slug}' not found").into()),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Active language: the saved preference, else the site default.
fn language_context(state_dir: &std::path::Path, site_config: &config::SiteConfig) -> LanguageContext {
    LanguageContext::load(
        PreferenceStore::new(state_dir),
        site_config.site.default_language,
    )
}
