use crate::commands::{CommandSender, argument::ArgumentType};
use cmdroute_text::ColorCode;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::warn;

/// Marks a completion hint as a reference to a named source.
pub const SOURCE_SIGIL: char = '@';

/// Ranges larger than this are treated like malformed ones.
const MAX_RANGE_SUGGESTIONS: i64 = 4096;

/// Live data the built-in completion sources enumerate. Every call is a synchronous snapshot.
pub trait Catalog: Send + Sync {
    fn online_players(&self) -> Vec<String>;

    fn worlds(&self) -> Vec<String> {
        Vec::new()
    }

    /// Item identifiers, lower case.
    fn materials(&self) -> Vec<String> {
        Vec::new()
    }

    /// Entity kinds that can be spawned.
    fn entity_types(&self) -> Vec<String> {
        Vec::new()
    }

    fn biomes(&self) -> Vec<String> {
        Vec::new()
    }

    fn sounds(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A catalog with nothing in it.
pub struct EmptyCatalog;

impl Catalog for EmptyCatalog {
    fn online_players(&self) -> Vec<String> {
        Vec::new()
    }
}

/// One declared completion for an argument position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionHint {
    /// Fixed alternatives, written `easy|normal|hard`, or a single literal.
    Literals(Vec<String>),
    /// `@id` or `@id:argument`.
    Source {
        id: String,
        argument: Option<String>,
        raw: String,
    },
}

impl CompletionHint {
    pub fn parse(raw: &str) -> Self {
        if let Some(reference) = raw.strip_prefix(SOURCE_SIGIL) {
            let (id, argument) = match reference.split_once(':') {
                Some((id, argument)) => (id, Some(argument.to_string())),
                None => (reference, None),
            };
            return CompletionHint::Source {
                id: id.to_string(),
                argument,
                raw: raw.to_string(),
            };
        }

        let alternatives: Vec<String> = raw
            .split('|')
            .filter(|alternative| !alternative.is_empty())
            .map(str::to_string)
            .collect();
        if alternatives.len() > 1 {
            CompletionHint::Literals(alternatives)
        } else {
            CompletionHint::Literals(vec![raw.to_string()])
        }
    }
}

/// What a completion source gets to work with.
pub struct SourceContext<'a> {
    pub sender: &'a dyn CommandSender,
    /// Declared type of the parameter being completed, if the position has one.
    pub type_context: Option<&'a ArgumentType>,
    /// The text after the colon in `@id:argument`.
    pub argument: Option<&'a str>,
}

pub type CompletionSource = Arc<dyn Fn(&SourceContext<'_>) -> Vec<String> + Send + Sync>;

pub struct CompletionSourceRegistry {
    sources: FxHashMap<String, CompletionSource>,
}

impl CompletionSourceRegistry {
    /// A registry with the built-in sources reading from `catalog`.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        let mut registry = Self::empty();

        let players = Arc::clone(&catalog);
        registry.register("player", move |_| players.online_players());
        let worlds = Arc::clone(&catalog);
        registry.register("world", move |_| worlds.worlds());
        let materials = Arc::clone(&catalog);
        registry.register("material", move |_| materials.materials());
        let entities = Arc::clone(&catalog);
        registry.register("entity", move |_| entities.entity_types());
        let biomes = Arc::clone(&catalog);
        registry.register("biome", move |_| biomes.biomes());
        registry.register("sound", move |_| catalog.sounds());

        registry.register("chatcolor", |_| {
            ColorCode::ALL
                .iter()
                .map(|color| color.name().to_string())
                .collect()
        });
        registry.register("enum", |ctx| match ctx.type_context {
            Some(ArgumentType::Enum(enum_type)) => enum_type
                .constants
                .iter()
                .map(|constant| constant.to_string())
                .collect(),
            _ => Vec::new(),
        });
        registry.register("range", |ctx| range(ctx.argument));

        registry
    }

    pub fn empty() -> Self {
        Self {
            sources: FxHashMap::default(),
        }
    }

    /// Registers or replaces a source. A leading `@` in `id` is ignored.
    pub fn register<F>(&mut self, id: impl AsRef<str>, source: F)
    where
        F: Fn(&SourceContext<'_>) -> Vec<String> + Send + Sync + 'static,
    {
        let id = id.as_ref();
        let id = id.strip_prefix(SOURCE_SIGIL).unwrap_or(id);
        self.sources.insert(id.to_lowercase(), Arc::new(source));
    }

    pub fn contains(&self, id: &str) -> bool {
        let id = id.strip_prefix(SOURCE_SIGIL).unwrap_or(id);
        self.sources.contains_key(&id.to_lowercase())
    }

    /// Candidates for `hint`. Unknown sources yield the hint text itself.
    pub fn resolve(
        &self,
        hint: &CompletionHint,
        sender: &dyn CommandSender,
        type_context: Option<&ArgumentType>,
    ) -> Vec<String> {
        match hint {
            CompletionHint::Literals(alternatives) => alternatives.clone(),
            CompletionHint::Source { id, argument, raw } => {
                match self.sources.get(&id.to_lowercase()) {
                    Some(source) => source(&SourceContext {
                        sender,
                        type_context,
                        argument: argument.as_deref(),
                    }),
                    None => {
                        warn!("Unknown completion source '{}'", raw);
                        vec![raw.clone()]
                    }
                }
            }
        }
    }
}

/// `min-max`, both inclusive. Anything unparsable yields nothing.
fn range(argument: Option<&str>) -> Vec<String> {
    let Some(argument) = argument else {
        return Vec::new();
    };
    let mut bounds = argument.split('-');
    let (Some(min), Some(max)) = (bounds.next(), bounds.next()) else {
        return Vec::new();
    };
    let (Ok(min), Ok(max)) = (min.trim().parse::<i64>(), max.trim().parse::<i64>()) else {
        return Vec::new();
    };
    if max.saturating_sub(min) >= MAX_RANGE_SUGGESTIONS {
        warn!("Completion range {} is too large", argument);
        return Vec::new();
    }
    (min..=max).map(|i| i.to_string()).collect()
}
