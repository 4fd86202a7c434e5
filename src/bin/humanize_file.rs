use humanizer_lib::models::{ClassificationResult, HumanizeResult, RewriteConfig};
use humanizer_lib::services::{
    extract_text, preview, AppConfig, ClassifierClient, ConfigStore, Humanizer, TextClassifier,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn parse_prob(args: &[String], key: &str, default: f64) -> anyhow::Result<f64> {
    match parse_arg_value(args, key) {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("{} expects a number, got {:?}", key, v)),
        None => Ok(default),
    }
}

fn print_classification(tag: &str, result: &ClassificationResult) {
    println!(
        "{}: {} (human={:.3} ai={:.3} mixed={:.3})",
        tag,
        result.label.as_str(),
        result.human_prob,
        result.ai_prob,
        result.mixed_prob
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin humanize_file -- <path.(txt|md|pdf|docx)> [--p-syn <0..1>] [--p-trans <0..1>] [--no-linebreaks] [--seed <n>] [--classify] [--out <json_path>]\n\nNotes:\n  - Defaults come from the stored config (humanize section).\n  - `--classify` needs HF_API_TOKEN or classifier.apiKey in the config."
        );
        return Ok(());
    }

    let path = args[1].clone();
    let store = ConfigStore::from_env().ok();
    let config_path = store
        .as_ref()
        .map(|s| s.config_file().display().to_string())
        .unwrap_or_else(|| "config.json".to_string());
    let config = match store.as_ref().map(ConfigStore::load_effective) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("Config unavailable ({}), using defaults", e);
            AppConfig::default()
        }
        None => {
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config
        }
    };

    let defaults = config.humanize.rewrite_config();
    let rewrite = RewriteConfig::new(
        parse_prob(&args, "--p-syn", defaults.p_syn)?,
        parse_prob(&args, "--p-trans", defaults.p_trans)?,
        defaults.preserve_linebreaks && !has_flag(&args, "--no-linebreaks"),
    );
    let seed: Option<u64> = parse_arg_value(&args, "--seed").and_then(|s| s.parse().ok());
    let classify = has_flag(&args, "--classify");
    let out_path = parse_arg_value(&args, "--out");

    let bytes = std::fs::read(&path).map_err(|e| anyhow::anyhow!("read file failed: {}", e))?;
    let file_name = std::path::Path::new(&path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.clone());
    let text = extract_text(&file_name, &bytes)?;

    let humanizer = Humanizer::new().with_strict_citations(config.humanize.strict_citations);
    let result: HumanizeResult = match seed {
        Some(seed) => humanizer.humanize_with_rng(&text, &rewrite, &mut ChaCha8Rng::seed_from_u64(seed))?,
        None => humanizer.humanize(&text, &rewrite)?,
    };

    println!("File: {}", path);
    println!("Extracted: {} chars", text.chars().count());
    println!(
        "Settings: p_syn={} p_trans={} preserve_linebreaks={} seed={}",
        rewrite.p_syn,
        rewrite.p_trans,
        rewrite.preserve_linebreaks,
        seed.map(|s| s.to_string()).unwrap_or_else(|| "(random)".to_string())
    );
    println!(
        "Words: {} -> {} ({:+})",
        result.orig_word_count, result.new_word_count, result.words_added
    );
    println!(
        "Sentences: {} -> {} ({:+})",
        result.orig_sentence_count, result.new_sentence_count, result.sentences_added
    );
    println!();
    println!("{}", preview(&result.humanized_text, 600));

    let mut before = None;
    let mut after = None;
    if classify {
        let client = ClassifierClient::new(&config.classifier);
        if !client.is_configured() {
            anyhow::bail!(
                "--classify needs a classifier token (HF_API_TOKEN or classifier.apiKey in {})",
                config_path
            );
        }
        println!();
        let b = client.classify(&text).await?;
        print_classification("Before", &b);
        let a = client.classify(&result.humanized_text).await?;
        print_classification("After", &a);
        before = Some(b);
        after = Some(a);
    }

    if let Some(out_path) = out_path {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Output<'a> {
            file: &'a str,
            settings: RewriteConfig,
            seed: Option<u64>,
            original_text: &'a str,
            result: &'a HumanizeResult,
            #[serde(skip_serializing_if = "Option::is_none")]
            classification_before: Option<ClassificationResult>,
            #[serde(skip_serializing_if = "Option::is_none")]
            classification_after: Option<ClassificationResult>,
        }

        let out = Output {
            file: &path,
            settings: rewrite,
            seed,
            original_text: &text,
            result: &result,
            classification_before: before,
            classification_after: after,
        };

        let json = serde_json::to_string_pretty(&out)?;
        std::fs::write(&out_path, json).map_err(|e| anyhow::anyhow!("write out failed: {}", e))?;
        println!();
        println!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
