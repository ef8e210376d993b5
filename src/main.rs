use std::{
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use loot_data::{ItemId, ItemIdClassifier, MapId, MonsterId};
use loot_server::{DropConfig, MonsterDropProvider};
use loot_store::JsonDropStore;

const QUEST_ITEMS_FILE_NAME: &str = "quest_items.json";

lazy_static! {
    static ref LOCAL_STORAGE_DIR: PathBuf = ProjectDirs::from("", "", "loot-server")
        .map_or_else(
            || PathBuf::from("."),
            |project| PathBuf::from(project.data_local_dir()),
        );
    static ref DROP_DATA_DIR: PathBuf = LOCAL_STORAGE_DIR.join("drops");
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct QuestItemLists {
    quest_items: Vec<ItemId>,
    party_quest_items: Vec<ItemId>,
}

fn load_classifier(data_dir: &Path) -> Result<ItemIdClassifier, anyhow::Error> {
    let path = data_dir.join(QUEST_ITEMS_FILE_NAME);
    if !path.exists() {
        return Ok(ItemIdClassifier::default());
    }

    let str = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file {}", path.to_string_lossy()))?;
    let lists: QuestItemLists = serde_json::from_str(&str).with_context(|| {
        format!(
            "Failed to deserialise quest item lists from file {}",
            path.to_string_lossy()
        )
    })?;
    Ok(ItemIdClassifier::new(lists.quest_items, lists.party_quest_items))
}

fn parse_arg<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, anyhow::Error> {
    let value = matches
        .value_of(name)
        .with_context(|| format!("Missing argument {}", name))?;
    value
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("Invalid value '{}' for {}", value, name))
}

fn command() -> Command<'static> {
    Command::new("loot-server")
        .about("Inspect monster drops resolved from the drop tables")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory containing drop_data.json and drop_data_global.json")
                .takes_value(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Drop configuration JSON file")
                .takes_value(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("One of off, error, warn, info, debug, trace")
                .takes_value(true)
                .default_value("info"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("drops")
                .about("Print the drop list of a monster")
                .arg(Arg::new("monster_id").required(true)),
        )
        .subcommand(
            Command::new("effective")
                .about("Print the drop list of a monster including extra equipment copies")
                .arg(Arg::new("monster_id").required(true)),
        )
        .subcommand(
            Command::new("pool")
                .about("Print the cumulative chance pool of a monster")
                .arg(Arg::new("monster_id").required(true)),
        )
        .subcommand(
            Command::new("global")
                .about("Print the global drops which apply to a map")
                .arg(Arg::new("map_id").required(true)),
        )
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let data_dir = matches
        .value_of("data-dir")
        .map_or_else(|| DROP_DATA_DIR.clone(), PathBuf::from);
    let config = match matches.value_of("config") {
        Some(path) => DropConfig::load(Path::new(path))?,
        None => DropConfig::default(),
    };
    let classifier = load_classifier(&data_dir)?;

    let provider = MonsterDropProvider::new(
        config,
        Arc::new(JsonDropStore::new(&data_dir)),
        Box::new(classifier),
    );

    match matches.subcommand() {
        Some(("drops", sub_matches)) => {
            let monster_id: MonsterId = parse_arg(sub_matches, "monster_id")?;
            for drop in provider.retrieve_drop(monster_id).iter() {
                println!("{:?}", drop);
            }
        }
        Some(("effective", sub_matches)) => {
            let monster_id: MonsterId = parse_arg(sub_matches, "monster_id")?;
            for drop in provider.retrieve_effective_drop(monster_id) {
                println!("{:?}", drop);
            }
        }
        Some(("pool", sub_matches)) => {
            let monster_id: MonsterId = parse_arg(sub_matches, "monster_id")?;
            let pool = provider.retrieve_drop_pool(monster_id);
            if pool.is_empty() {
                println!("Monster {} has no weighted drops", monster_id);
            }

            let drops = provider.retrieve_drop(monster_id);
            for (drop, weight) in drops.iter().zip(pool.iter()) {
                println!("{} {}", weight, drop.item_id);
            }
        }
        Some(("global", sub_matches)) => {
            let map_id: MapId = parse_arg(sub_matches, "map_id")?;
            log::info!("Map {} is on continent {}", map_id, map_id.continent());
            for drop in provider.get_relevant_global_drops(map_id).iter() {
                println!("{:?}", drop);
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn main() {
    let matches = command().get_matches();

    let log_level = matches
        .value_of("log-level")
        .and_then(|level| LevelFilter::from_str(level).ok())
        .unwrap_or(LevelFilter::Info);
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    if let Err(error) = run(&matches) {
        log::error!("{:?}", error);
        std::process::exit(1);
    }
}
