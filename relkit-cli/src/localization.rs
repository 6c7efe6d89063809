use std::path::PathBuf;

use clap::Parser;
use relkit::{Config, Error, LocalizationValidator, ValidationReport};

/// Validate that every language's .strings table matches the base language.
#[derive(Parser, Debug)]
#[command(name = "validate-localization", author, version, about, long_about = None)]
pub struct ValidateArgs {
    /// Project root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Config file (defaults to relkit.toml under the project root, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a .strings snippet of the missing keys for each language
    #[arg(long, conflicts_with = "json")]
    pub template: bool,
}

/// Runs the validation and prints the report. Returns whether the tables are valid.
pub fn run_validate(args: ValidateArgs) -> Result<bool, Error> {
    let config = Config::discover(&args.root, args.config.as_deref())?;
    let validator = LocalizationValidator::from_config(&config, &args.root);
    tracing::debug!(
        resources_dir = %validator.resources_dir().display(),
        languages = ?config.localization.languages,
        base = %config.localization.base_language,
        "validating localization tables"
    );

    if !args.json {
        println!("🌍 Localization Validation");
        println!("{}", "=".repeat(50));
        println!("📁 Resources directory: {}", validator.resources_dir().display());
    }

    let report = validator.validate()?;

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(report.is_valid());
    }

    println!("{}", render_human(&report));

    if args.template {
        for lang in &report.languages {
            if let Some(template) = report.missing_keys_template(&lang.language)? {
                println!("\n📝 Template for {} ({}):", lang.language, lang.path.display());
                print!("{}", template);
            }
        }
    }

    Ok(report.is_valid())
}

fn push_keys<'a>(lines: &mut Vec<String>, keys: impl IntoIterator<Item = &'a String>) {
    for key in keys {
        lines.push(format!("   • {}", key));
    }
}

pub fn render_human(report: &ValidationReport) -> String {
    let mut lines = Vec::new();

    for lang in &report.languages {
        lines.push(format!("\n🌍 Checking language: {}", lang.language));
        lines.push(format!("📄 File path: {}", lang.path.display()));
        if lang.found {
            lines.push(format!("✅ Found {} translation keys", lang.key_count));
        } else {
            lines.push(format!("❌ File does not exist: {}", lang.path.display()));
        }
    }

    if let Some(base) = report.base() {
        lines.push(format!(
            "\n📊 Base language ({}) contains {} keys",
            base.language, base.key_count
        ));
    }

    for lang in report.languages.iter().filter(|lang| !lang.is_base) {
        lines.push(format!("\n🔍 Checking language: {}", lang.language));

        if !lang.missing.is_empty() {
            lines.push(format!("❌ Missing {} keys:", lang.missing.len()));
            push_keys(&mut lines, &lang.missing);
        }
        if !lang.extra.is_empty() {
            lines.push(format!("⚠️  Extra {} keys:", lang.extra.len()));
            push_keys(&mut lines, &lang.extra);
        }
        if lang.missing.is_empty() && lang.extra.is_empty() {
            lines.push("✅ Translation complete".to_string());
        }
    }

    lines.push("\n🔍 Checking empty translations...".to_string());
    for lang in &report.languages {
        if lang.empty.is_empty() {
            lines.push(format!("✅ {} has no empty translations", lang.language));
        } else {
            lines.push(format!(
                "❌ {} has {} empty translations:",
                lang.language,
                lang.empty.len()
            ));
            push_keys(&mut lines, &lang.empty);
        }
    }

    lines.push(format!("\n{}", "=".repeat(50)));
    if report.is_valid() {
        lines.push("🎉 All localization files validated successfully!".to_string());
    } else {
        lines.push("❌ Found localization issues, please fix and retry".to_string());
        lines.push("\n💡 Suggestions:".to_string());
        lines.push("1. Add the missing translation keys (--template prints them)".to_string());
        lines.push("2. Remove extra keys or add them to the base language".to_string());
        lines.push("3. Fill in empty translation values".to_string());
        lines.push("4. Run again to re-validate".to_string());
    }

    lines.join("\n")
}
