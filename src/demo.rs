use cmdroute_core::command_enum;
use cmdroute_core::commands::{
    ArgumentType, Catalog, CommandDescriptor, CommandError, CommandManager, CommandResult,
    ParseError, RegistrationError, Value,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct DemoCatalog {
    players: Vec<String>,
}

impl DemoCatalog {
    pub fn new(player_name: &str) -> Self {
        Self {
            players: vec![player_name.to_string(), "Notch".to_string(), "jeb_".to_string()],
        }
    }
}

impl Catalog for DemoCatalog {
    fn online_players(&self) -> Vec<String> {
        self.players.clone()
    }

    fn worlds(&self) -> Vec<String> {
        ["world", "world_nether", "world_the_end"].map(String::from).to_vec()
    }

    fn materials(&self) -> Vec<String> {
        ["stone", "redstone", "repeater", "comparator", "lever", "sandstone"]
            .map(String::from)
            .to_vec()
    }

    fn entity_types(&self) -> Vec<String> {
        ["creeper", "pig", "villager"].map(String::from).to_vec()
    }

    fn biomes(&self) -> Vec<String> {
        ["plains", "desert", "taiga"].map(String::from).to_vec()
    }

    fn sounds(&self) -> Vec<String> {
        ["block.note_block.harp", "entity.experience_orb.pickup"]
            .map(String::from)
            .to_vec()
    }
}

#[derive(Debug, Clone, Copy)]
enum Difficulty {
    Peaceful,
    Easy,
    Normal,
    Hard,
}
command_enum!(Difficulty { Peaceful, Easy, Normal, Hard });

struct Warp {
    owner: String,
    radius: i32,
}

type Warps = Arc<Mutex<BTreeMap<String, Warp>>>;

fn lock(warps: &Warps) -> CommandResult<MutexGuard<'_, BTreeMap<String, Warp>>> {
    warps
        .lock()
        .map_err(|_| CommandError::internal("warp storage is poisoned"))
}

/// The sample command set the console starts with.
pub fn register(
    manager: &mut CommandManager,
    catalog: Arc<DemoCatalog>,
) -> Result<(), RegistrationError> {
    let warps: Warps = Arc::new(Mutex::new(BTreeMap::from([(
        "spawn".to_string(),
        Warp {
            owner: "CONSOLE".to_string(),
            radius: 5,
        },
    )])));

    let source = Arc::clone(&warps);
    manager.sources_mut().register("warp", move |_| {
        source
            .lock()
            .map(|warps| warps.keys().cloned().collect())
            .unwrap_or_default()
    });

    let online = Arc::clone(&catalog);
    manager
        .coercions_mut()
        .register(ArgumentType::custom("player"), move |input| {
            online
                .online_players()
                .into_iter()
                .find(|player| player.eq_ignore_ascii_case(input))
                .map(Value::String)
                .ok_or_else(|| ParseError::invalid_value("player", input))
        });

    let (list, get, set, delete) = (
        Arc::clone(&warps),
        Arc::clone(&warps),
        Arc::clone(&warps),
        warps,
    );
    manager.register_all([
        CommandDescriptor::new("warp")
            .description("Teleports to a warp, or lists them")
            .require_permission("warps.use")
            .remainder("args")
            .completions(["@warp"])
            .executes(move |ctx| {
                let args = ctx.args().get_remainder("args")?;
                let Some(name) = args.first() else {
                    let names: Vec<String> = lock(&get)?.keys().cloned().collect();
                    return ctx.reply(&format!("&6Warps: &e{}", names.join(", ")));
                };
                let warps = lock(&get)?;
                match warps.get(&name.to_lowercase()) {
                    Some(warp) => ctx.reply(&format!(
                        "&aTeleported to &e{}&a (radius {}, set by {})",
                        name, warp.radius, warp.owner
                    )),
                    None => Err(CommandError::runtime(format!("Unknown warp '{}'", name))),
                }
            }),
        CommandDescriptor::new("warp set")
            .alias("setwarp")
            .description("Creates or moves a warp at your position")
            .require_permission("warps.set")
            .player("player")
            .argument("name", ArgumentType::string())
            .optional("radius", ArgumentType::integer(), "5")
            .executes(move |ctx| {
                let name = ctx.args().get_string("name")?;
                let radius = ctx.args().get_integer("radius")?;
                let owner = ctx.player_name()?.to_string();
                lock(&set)?.insert(name.to_lowercase(), Warp { owner, radius });
                ctx.reply(&format!("&aWarp &e{}&a set with radius {}", name, radius))
            }),
        CommandDescriptor::new("warp delete")
            .alias("delwarp")
            .description("Removes a warp")
            .require_permission("warps.delete")
            .argument("name", ArgumentType::string())
            .completions(["@warp"])
            .executes(move |ctx| {
                let name = ctx.args().get_string("name")?;
                match lock(&delete)?.remove(&name.to_lowercase()) {
                    Some(_) => ctx.reply(&format!("&aWarp &e{}&a deleted", name)),
                    None => Err(CommandError::runtime(format!("Unknown warp '{}'", name))),
                }
            }),
        CommandDescriptor::new("warp list")
            .sender("sender")
            .executes(move |ctx| {
                let warps = lock(&list)?;
                ctx.reply(&format!("&6{} warps:", warps.len()))?;
                for (name, warp) in warps.iter() {
                    ctx.reply(&format!(" &e{} &7({})", name, warp.owner))?;
                }
                Ok(())
            }),
        CommandDescriptor::new("difficulty")
            .description("Shows the chosen difficulty")
            .argument("level", ArgumentType::enumeration::<Difficulty>())
            .completions(["@enum"])
            .executes(|ctx| {
                let level = ctx.args().get_enum::<Difficulty>("level")?;
                ctx.reply(&format!("&aDifficulty set to &e{:?}", level))
            }),
        CommandDescriptor::new("give")
            .description("Gives an item to an online player")
            .require_permission("items.give")
            .argument("target", ArgumentType::custom("player"))
            .argument("item", ArgumentType::string())
            .optional("amount", ArgumentType::integer(), "1")
            .completions(["@player", "@material", "@range:1-64"])
            .executes(|ctx| {
                let target = ctx.args().get_string("target")?;
                let item = ctx.args().get_string("item")?;
                let amount = ctx.args().get_integer("amount")?;
                if amount < 1 {
                    return ctx.error("Amount must be positive");
                }
                ctx.reply(&format!("&aGave {} &e{}&a to {}", amount, item, target))
            }),
        CommandDescriptor::new("weather")
            .argument("kind", ArgumentType::string())
            .completions(["clear|rain|thunder"])
            .executes(|ctx| {
                let kind = ctx.args().get_string("kind")?;
                ctx.reply(&format!("&bWeather is now {}", kind))
            }),
        CommandDescriptor::new("color")
            .description("Previews a display color")
            .argument("name", ArgumentType::string())
            .completions(["@chatcolor"])
            .executes(|ctx| {
                let name = ctx.args().get_string("name")?;
                match cmdroute_text::ColorCode::ALL
                    .iter()
                    .find(|color| color.name().eq_ignore_ascii_case(&name))
                {
                    Some(color) => ctx.reply(&format!("&{}{}", color.code(), color.name())),
                    None => Err(CommandError::runtime(format!("Unknown color '{}'", name))),
                }
            }),
        CommandDescriptor::new("say")
            .sender("sender")
            .remainder("message")
            .executes(|ctx| {
                let message = ctx.args().get_remainder("message")?.join(" ");
                ctx.reply(&format!("&d[{}] {}", ctx.sender().name(), message))
            }),
        CommandDescriptor::new("msg")
            .alias("tell")
            .argument("target", ArgumentType::custom("player"))
            .remainder("message")
            .executes(|ctx| {
                let target = ctx.args().get_string("target")?;
                let message = ctx.args().get_remainder("message")?.join(" ");
                ctx.reply(&format!("&7[me -> {}] {}", target, message))
            }),
        CommandDescriptor::new("stop")
            .description("Stops the server")
            .require_permission("server.stop")
            .console("console")
            .executes(|ctx| ctx.reply("&cStopping the server")),
    ])?;

    let players = catalog;
    manager.register_tab_completer(["msg", "tell"], move |_, args| {
        Ok(match args {
            [_target] => players.online_players(),
            _ => Vec::new(),
        })
    })
}
