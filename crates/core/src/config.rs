use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use toml_edit::{Array, DocumentMut, Item, Table, value};

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

impl ConfigSerializeDefault for String {
    fn fix_config(self, name: &str, doc: &mut DocumentMut) {
        doc.entry(name).or_insert_with(|| value(self));
    }
}

impl ConfigSerializeDefault for Vec<String> {
    fn fix_config(self, name: &str, doc: &mut DocumentMut) {
        doc.entry(name)
            .or_insert_with(|| value(self.into_iter().collect::<Array>()));
    }
}

impl ConfigSerializeDefault for IndexMap<String, String> {
    fn fix_config(self, name: &str, doc: &mut DocumentMut) {
        doc.entry(name).or_insert_with(|| {
            let mut table = Table::new();
            for (key, entry) in self {
                table.insert(&key, value(entry));
            }
            Item::Table(table)
        });
    }
}

macro_rules! gen_config {
    (
        $( $(#[$doc:meta])* $name:ident: $type:ty = $default:expr),*
    ) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct Config {
            $(
                $(#[$doc])*
                pub $name: $type,
            )*
        }

        impl Default for Config {
            fn default() -> Self {
                Config {
                    $( $name: $default, )*
                }
            }
        }

        impl Config {
            /// Reads `config_file`, writing back any keys that were missing.
            pub fn load(config_file: impl AsRef<Path>) -> Result<Config> {
                let config_file = config_file.as_ref();
                let str = fs::read_to_string(config_file).unwrap_or_default();
                let mut doc = str
                    .parse::<DocumentMut>()
                    .with_context(|| format!("Failed to parse {}", config_file.display()))?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    let mut file = fs::OpenOptions::new()
                        .create(true)
                        .write(true)
                        .truncate(true)
                        .open(config_file)
                        .with_context(|| format!("Failed to open {}", config_file.display()))?;
                    write!(file, "{}", patched)?;
                }

                toml::from_str(&patched)
                    .with_context(|| format!("Invalid configuration in {}", config_file.display()))
            }
        }
    };
}

gen_config! {
    /// Prefix to replacement. `{}` marks where the rest of the line goes.
    command_aliases: IndexMap<String, String> = IndexMap::new(),
    /// Message id to template overrides.
    messages: IndexMap<String, String> = IndexMap::new(),
    console_permissions: Vec<String> = vec!["*".to_string()],
    player_name: String = "Steve".to_string(),
    /// Evaluated in order, the first matching node wins. Prefix with `-` to deny.
    player_permissions: Vec<String> = vec!["-server.*".to_string(), "*".to_string()]
}
