use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use spawner_core::{
    load_settings, save_default_config, EntityCatalog, InfoReport, ObservedSpawner, Settings,
    SpawnerField,
};

/// What an untouched vanilla spawner holds.
const STOCK_SPAWNER: ObservedSpawner = ObservedSpawner {
    min_spawn_delay: 200,
    max_spawn_delay: 800,
    spawn_count: 4,
    max_nearby_entities: 6,
    required_player_range: 16,
    spawn_range: 4,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommonOptions {
    pub(crate) config_path: PathBuf,
    pub(crate) json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Init,
    Check,
    Entities,
    Resolve {
        world: String,
        entity: Option<String>,
        observed: Option<ObservedSpawner>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Invocation {
    Help,
    Run {
        kind: CommandKind,
        options: CommonOptions,
    },
}

pub(crate) fn parse_args(
    args: &[String],
    default_config_path: PathBuf,
) -> Result<Invocation, String> {
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" || args[0] == "help" {
        return Ok(Invocation::Help);
    }

    let mut options = CommonOptions {
        config_path: default_config_path,
        json: false,
    };
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--config" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --config".to_string())?;
                options.config_path = PathBuf::from(value);
                index += 2;
            }
            "--json" => {
                options.json = true;
                index += 1;
            }
            _ => break,
        }
    }

    let command = args
        .get(index)
        .ok_or_else(|| "missing subcommand".to_string())?
        .as_str();
    let command_args = &args[(index + 1)..];

    let kind = match command {
        "init" => {
            expect_no_args("init", command_args)?;
            CommandKind::Init
        }
        "check" => {
            expect_no_args("check", command_args)?;
            CommandKind::Check
        }
        "entities" => {
            expect_no_args("entities", command_args)?;
            CommandKind::Entities
        }
        "resolve" => parse_resolve(command_args)?,
        other => return Err(format!("unknown subcommand '{other}'")),
    };
    if options.json && kind == CommandKind::Init {
        return Err("init does not support --json".to_string());
    }

    Ok(Invocation::Run { kind, options })
}

fn expect_no_args(command: &str, args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(format!("{command} takes no arguments"))
    }
}

fn parse_resolve(args: &[String]) -> Result<CommandKind, String> {
    let [world, entity, rest @ ..] = args else {
        return Err("resolve requires <world> <entity|->".to_string());
    };
    let entity = (entity != "-").then(|| entity.clone());

    let mut observed = None::<ObservedSpawner>;
    let mut index = 0usize;
    while index < rest.len() {
        if rest[index] != "--observed" {
            return Err(format!(
                "unknown resolve argument '{}' (expected --observed)",
                rest[index]
            ));
        }
        let pair = rest
            .get(index + 1)
            .ok_or_else(|| "missing value for --observed".to_string())?;
        let (field, value) = parse_observed_pair(pair)?;
        observed.get_or_insert(STOCK_SPAWNER).set(field, value);
        index += 2;
    }

    Ok(CommandKind::Resolve {
        world: world.clone(),
        entity,
        observed,
    })
}

fn parse_observed_pair(pair: &str) -> Result<(SpawnerField, u32), String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("invalid --observed value '{pair}' (expected <field>=<u32>)"))?;
    let field = SpawnerField::from_config_key(key)
        .filter(|field| *field != SpawnerField::SpawnCap)
        .ok_or_else(|| format!("unknown spawner field '{}'", key.trim()))?;
    let value = value
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid value '{}' for {field} (expected u32)", value.trim()))?;
    Ok((field, value))
}

pub(crate) fn run<W: Write>(
    kind: CommandKind,
    options: &CommonOptions,
    catalog: &EntityCatalog,
    out: &mut W,
) -> Result<(), String> {
    let path = &options.config_path;
    match kind {
        CommandKind::Init => {
            let written = save_default_config(path).map_err(|error| error.to_string())?;
            let message = if written {
                format!("wrote default config to {}", path.display())
            } else {
                format!("config already exists at {}; left untouched", path.display())
            };
            write_line(out, &message)
        }
        CommandKind::Check => {
            let loaded = load_settings(path, catalog).map_err(|error| error.to_string())?;
            if options.json {
                let summary = summary_json(&loaded.settings, &loaded.digest_sha256_hex);
                write_json(out, &summary)
            } else {
                write_line(out, &render_summary(&loaded.settings, &loaded.digest_sha256_hex))
            }
        }
        CommandKind::Entities => {
            if options.json {
                return write_json(out, &catalog.iter().collect::<Vec<_>>());
            }
            for entity_type in catalog.iter() {
                write_line(out, entity_type.as_str())?;
            }
            Ok(())
        }
        CommandKind::Resolve {
            world,
            entity,
            observed,
        } => {
            let entity_type = match entity.as_deref() {
                Some(name) => Some(
                    catalog
                        .parse(name)
                        .ok_or_else(|| format!("unknown entity type '{name}'"))?,
                ),
                None => None,
            };
            let loaded = load_settings(path, catalog).map_err(|error| error.to_string())?;
            let report = InfoReport::build(&loaded.settings, &world, entity_type.as_ref(), observed);
            if options.json {
                write_json(out, &report)
            } else {
                write_line(out, &report.render_human_readable())
            }
        }
    }
}

fn sorted_names<'a, T: ToString + 'a>(names: impl IntoIterator<Item = &'a T>) -> Vec<String> {
    let mut names = names.into_iter().map(ToString::to_string).collect::<Vec<_>>();
    names.sort();
    names
}

fn summary_json(settings: &Settings, digest: &str) -> Value {
    json!({
        "digest": digest,
        "defaults": settings.defaults(),
        "worlds": sorted_names(settings.per_world().keys()),
        "entities": sorted_names(settings.per_entity().keys()),
        "whitelist": sorted_names(settings.whitelist()),
        "blacklist": sorted_names(settings.blacklist()),
        "disableSafetyCaps": settings.disable_safety_caps(),
        "disableSpawnCaps": settings.disable_spawn_caps(),
    })
}

fn render_summary(settings: &Settings, digest: &str) -> String {
    let worlds = sorted_names(settings.per_world().keys());
    let entities = sorted_names(settings.per_entity().keys());
    let whitelist = sorted_names(settings.whitelist());
    let blacklist = sorted_names(settings.blacklist());

    [
        format!("digest={digest}"),
        format!("defaults={:?}", settings.defaults().to_sentinels()),
        format!("worlds=[{}]", worlds.join(",")),
        format!("entities=[{}]", entities.join(",")),
        format!("whitelist=[{}]", whitelist.join(",")),
        format!("blacklist=[{}]", blacklist.join(",")),
        format!("disable_safety_caps={}", settings.disable_safety_caps()),
        format!("disable_spawn_caps={}", settings.disable_spawn_caps()),
    ]
    .join("\n")
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), String> {
    let text =
        serde_json::to_string_pretty(value).map_err(|error| format!("encode json: {error}"))?;
    write_line(out, &text)
}

fn write_line<W: Write>(out: &mut W, text: &str) -> Result<(), String> {
    writeln!(out, "{text}").map_err(|error| format!("write output: {error}"))
}

pub(crate) fn usage_text() -> String {
    [
        "spawnertweaks - inspect spawner tuning resolution offline",
        "",
        "Usage:",
        "  spawnertweaks [--config <path>] init",
        "  spawnertweaks [--config <path>] [--json] check",
        "  spawnertweaks [--json] entities",
        "  spawnertweaks [--config <path>] [--json] resolve <world> <entity|-> [--observed <field>=<u32>]...",
        "",
        "Defaults:",
        "  --config $SPAWNERTWEAKS_CONFIG, else ./config.json",
        "  --observed fields not given default to a stock spawner (200/800/4/6/16/4)",
    ]
    .join("\n")
}
