// build.rs

use std::collections::BTreeMap;
use std::env;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const LOCALES_DIR: &str = "locales";
const FALLBACK_LANG: &str = "en";
const LANG_ENV: &str = "CONSOLA_LANG";

type Catalog = BTreeMap<String, String>;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed={}", LANG_ENV);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}/", LOCALES_DIR);

    let requested = select_language();
    let mut lang = FALLBACK_LANG.to_string();
    let mut catalog = read_catalog(&locale_path(FALLBACK_LANG))?;
    if requested != FALLBACK_LANG {
        let path = locale_path(&requested);
        if path.is_file() {
            let overlay = read_catalog(&path)?;
            merge(&mut catalog, overlay, &requested);
            lang = requested;
        } else {
            println!(
                "cargo:warning=Language file '{}' not found (available: {}). Falling back to '{}'.",
                path.display(),
                available_languages().join(", "),
                FALLBACK_LANG
            );
        }
    }
    println!("cargo:rustc-env=CONSOLA_LANG_EFFECTIVE={}", lang);

    let out_dir = env::var("OUT_DIR")?;
    fs::write(Path::new(&out_dir).join("translations.rs"), render_macro(&catalog, &lang))?;
    Ok(())
}

/// A `lang_*` feature wins over `CONSOLA_LANG`, which wins over English.
/// Several features pick the alphabetically first one.
fn select_language() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| key.strip_prefix("CARGO_FEATURE_LANG_").map(str::to_lowercase))
        .collect();
    features.sort();

    match features.split_first() {
        Some((first, rest)) => {
            if !rest.is_empty() {
                println!(
                    "cargo:warning=Multiple language features enabled ({:?}); using '{}'.",
                    features, first
                );
            }
            first.clone()
        }
        None => env::var(LANG_ENV).unwrap_or_else(|_| FALLBACK_LANG.to_string()),
    }
}

fn locale_path(lang: &str) -> std::path::PathBuf {
    Path::new(LOCALES_DIR).join(format!("{}.toml", lang))
}

fn available_languages() -> Vec<String> {
    let mut langs: Vec<String> = fs::read_dir(LOCALES_DIR)
        .into_iter()
        .flatten()
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension()? != "toml" {
                return None;
            }
            path.file_stem()?.to_str().map(String::from)
        })
        .collect();
    langs.sort();
    langs
}

fn read_catalog(path: &Path) -> Result<Catalog, Box<dyn Error>> {
    let content = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let catalog = toml::from_str(&content).map_err(|e| format!("cannot parse {}: {}", path.display(), e))?;
    Ok(catalog)
}

/// Overlays `translated` on the English catalog. Keys English does not know
/// are dropped with a warning; untranslated keys keep the English text.
fn merge(catalog: &mut Catalog, translated: Catalog, lang: &str) {
    let mut missing = catalog.len();
    for (key, value) in translated {
        match catalog.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                missing -= 1;
            }
            None => println!("cargo:warning={}: unknown message key '{}' ignored", lang, key),
        }
    }
    if missing > 0 {
        println!(
            "cargo:warning={}: {} message(s) not translated, using '{}'",
            lang, missing, FALLBACK_LANG
        );
    }
}

/// One literal arm per key; any other key fails to compile.
fn render_macro(catalog: &Catalog, lang: &str) -> String {
    let mut code = format!(
        "/// Message `$key` from `{dir}/{lang}.toml`, as a `&'static str`.\n\
         /// Unknown keys are a compile error.\n\
         #[macro_export]\n\
         macro_rules! t {{\n",
        dir = LOCALES_DIR,
        lang = lang
    );
    for (key, value) in catalog {
        let _ = writeln!(code, "    ({:?}) => {{ {:?} }};", key, value);
    }
    code.push_str("    ($key:expr) => { compile_error!(concat!(\"Missing translation key: \", $key)) };\n}\n");
    code
}
