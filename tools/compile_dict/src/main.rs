// Compile plain word-list assets into packed binary trie dictionaries.
//
// Word lists are named `<lang>_words.txt` and live next to the compiled
// `<lang>.bin` outputs the keyboard ships. Run with no language filter to
// compile every list found in the assets directory.

use anyhow::{bail, Context, Result};
use clap::Parser;
use libpredict_core::asset;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Compile word lists into binary trie dictionaries")]
struct Args {
    /// Directory containing <lang>_words.txt inputs
    #[arg(long, default_value = "assets/dictionaries")]
    assets: PathBuf,

    /// Output directory for .bin files (defaults to the assets directory)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Languages to compile (default: every *_words.txt in the assets dir)
    #[arg(long, num_args = 0..)]
    languages: Vec<String>,
}

fn discover_languages(assets: &PathBuf) -> Result<Vec<String>> {
    let mut langs = Vec::new();
    for entry in std::fs::read_dir(assets)
        .with_context(|| format!("read assets directory {}", assets.display()))?
    {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if let Some(lang) = name.strip_suffix("_words.txt") {
            langs.push(lang.to_string());
        }
    }
    langs.sort();
    langs.dedup();
    Ok(langs)
}

fn compile_language(lang: &str, assets: &PathBuf, out_dir: &PathBuf) -> Result<PathBuf> {
    let words_path = assets.join(format!("{lang}_words.txt"));
    let text = std::fs::read_to_string(&words_path)
        .with_context(|| format!("missing word list {}", words_path.display()))?;
    let words = asset::parse_word_list(&text);
    if words.is_empty() {
        bail!("word list {} contains no words", words_path.display());
    }

    let out_path = out_dir.join(format!("{lang}.bin"));
    let file = File::create(&out_path)
        .with_context(|| format!("create {}", out_path.display()))?;
    let mut writer = BufWriter::new(file);
    asset::write_packed(&words, &mut writer)
        .with_context(|| format!("compile {lang} dictionary"))?;
    Ok(out_path)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let out_dir = args.out.clone().unwrap_or_else(|| args.assets.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let langs = if args.languages.is_empty() {
        discover_languages(&args.assets)?
    } else {
        args.languages.clone()
    };
    if langs.is_empty() {
        bail!("no *_words.txt files found in {}", args.assets.display());
    }

    println!("Compiling languages: {}", langs.join(", "));
    for lang in &langs {
        let out = compile_language(lang, &args.assets, &out_dir)?;
        let size_kb = std::fs::metadata(&out)?.len() as f64 / 1024.0;
        println!("  {lang}.bin -> {} ({size_kb:.1} KB)", out.display());
    }
    Ok(())
}
