use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::env;
use std::path::Path;

use recipe_portions::iconography::IconTable;
use recipe_portions::localization::{detect_language, Translations};
use recipe_portions::portion_config::AppConfig;
use recipe_portions::portion_model::Shape;
use recipe_portions::preferences::{JsonFileStore, PreferenceStore};
use recipe_portions::recipe_index::{build_index, collect_categories, find_by_name, IndexEntry};
use recipe_portions::recipe_model::Recipe;
use recipe_portions::recipe_view::RecipeSession;
use recipe_portions::search::filter_index;

const USAGE: &str = "Usage:
  recipe_portions list [query] [--category <name>] [--lang <code>]
  recipe_portions show <recipe> [--variant <key>] [--lang <code>]
  recipe_portions scale <recipe> <+|-|circular|rectangular|square> [--lang <code>]";

/// Command line arguments split into positionals and `--flag value` options
struct Args {
    positional: Vec<String>,
    category: Option<String>,
    variant: Option<String>,
    lang: Option<String>,
}

impl Args {
    fn parse(raw: impl Iterator<Item = String>) -> Result<Self> {
        let mut args = Self {
            positional: Vec::new(),
            category: None,
            variant: None,
            lang: None,
        };
        let mut raw = raw.peekable();
        while let Some(arg) = raw.next() {
            let slot = match arg.as_str() {
                "--category" => &mut args.category,
                "--variant" => &mut args.variant,
                "--lang" => &mut args.lang,
                _ => {
                    args.positional.push(arg);
                    continue;
                }
            };
            let value = raw.next().with_context(|| format!("Missing value for {arg}"))?;
            *slot = Some(value);
        }
        Ok(args)
    }
}

async fn load_index(recipes_dir: &Path) -> Result<Vec<IndexEntry>> {
    let index_path = recipes_dir.join("index.json");
    if let Ok(content) = tokio::fs::read_to_string(&index_path).await {
        return serde_json::from_str(&content)
            .with_context(|| format!("Invalid index at {}", index_path.display()));
    }

    info!("No index.json, building index from recipe documents");
    let documents_dir = recipes_dir.join("recipes");
    let mut entries = tokio::fs::read_dir(&documents_dir)
        .await
        .with_context(|| format!("Failed to list {}", documents_dir.display()))?;

    let mut documents = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name().to_string_lossy().to_string();
        if !file_name.ends_with(".json") {
            continue;
        }
        match tokio::fs::read_to_string(entry.path()).await {
            Ok(content) => documents.push((file_name, content)),
            Err(e) => warn!("Skipping {}: {}", file_name, e),
        }
    }
    Ok(build_index(documents))
}

async fn load_translations(recipes_dir: &Path, language: &str) -> Translations {
    let path = recipes_dir.join(format!("translations/{language}.json"));
    let loaded = match tokio::fs::read_to_string(&path).await {
        Ok(content) => Translations::from_json(language, &content),
        Err(e) => Err(e.into()),
    };
    loaded.unwrap_or_else(|e| {
        warn!("No translation file for {} ({}): {}", language, path.display(), e);
        Translations::empty(language)
    })
}

async fn load_icons(recipes_dir: &Path) -> IconTable {
    let path = recipes_dir.join("translations/emoji.json");
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => IconTable::with_overrides_json(&content).unwrap_or_else(|e| {
            warn!("Invalid emoji file {}: {}", path.display(), e);
            IconTable::new()
        }),
        Err(_) => IconTable::new(),
    }
}

async fn load_recipe(recipes_dir: &Path, entry: &IndexEntry) -> Result<Recipe> {
    let path = recipes_dir.join(&entry.path);
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read recipe {}", path.display()))?;
    Ok(Recipe::from_json(&content)?)
}

fn print_session(session: &RecipeSession, translations: &Translations, icons: &IconTable) {
    println!("{}", translations.translate_field(&session.recipe().title));
    println!("{}", session.route().to_hash());
    println!();
    println!("{}", session.ingredients_title(translations));

    for group in session.ingredient_groups(translations, icons) {
        if let Some(name) = group.name {
            println!("  {name}");
        }
        for row in group.items {
            let line = [
                row.value.as_str(),
                row.unit.as_str(),
                row.connector.as_str(),
                row.name.as_str(),
                row.text.as_str(),
            ]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
            println!("    {} {}", row.emoji, line);
        }
    }

    println!();
    for (i, step) in session.instructions(translations).iter().enumerate() {
        println!("  {}. {}", i + 1, step.text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    let args = Args::parse(env::args().skip(1))?;
    let language = detect_language(args.lang.as_deref().or(config.language.as_deref()));

    info!(
        "Starting recipe_portions with recipes from {} (language {})",
        config.recipes_dir.display(),
        language
    );

    let index = load_index(&config.recipes_dir).await?;
    let translations = load_translations(&config.recipes_dir, &language).await;
    let icons = load_icons(&config.recipes_dir).await;
    let mut preferences = PreferenceStore::new(JsonFileStore::open(&config.preferences_path)?);

    let command = args.positional.first().map(String::as_str);
    match command {
        Some("list") => {
            let query = args.positional.get(1).map(String::as_str).unwrap_or("");
            for entry in filter_index(&index, query, args.category.as_deref(), &translations) {
                println!(
                    "{:<24} {}",
                    entry.recipe_name(),
                    translations.translate_field(&entry.title)
                );
            }
            println!();
            println!("Categories: {}", collect_categories(&index).join(", "));
        }
        Some(command @ ("show" | "scale")) => {
            let name = args.positional.get(1).context("Missing recipe name")?;
            let Some(entry) = find_by_name(&index, name) else {
                bail!("Recipe not found: {name}");
            };
            let recipe = load_recipe(&config.recipes_dir, entry).await?;
            let mut session =
                RecipeSession::open(name, recipe, args.variant.as_deref(), &mut preferences);

            if command == "scale" {
                match args.positional.get(2).map(String::as_str) {
                    Some("+") => session.increment(&mut preferences),
                    Some("-") => session.decrement(&mut preferences),
                    Some("circular") => session.set_shape(Shape::Circular, &mut preferences),
                    Some("rectangular") => session.set_shape(Shape::Rectangular, &mut preferences),
                    Some("square") => session.set_shape(Shape::Square, &mut preferences),
                    other => bail!("Unknown scale action {:?}\n{}", other, USAGE),
                }
            }

            print_session(&session, &translations, &icons);
        }
        _ => {
            println!("{USAGE}");
        }
    }

    Ok(())
}
