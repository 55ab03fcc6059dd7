//! Offline session against the simulated world.
//!
//! Each stdin line is either chat (`message` or `sender: message`) or a
//! session control starting with `/`:
//!
//! - `/move <x> <y> <z>` moves the operator
//! - `/spawn <name> <x> <y> <z>` adds a mob
//! - `/where` logs the agent's position and status
//! - `/quit` ends the session
//!
//! Fights resolve after [`FIGHT_DURATION`]: the target dies and the agent is
//! told that it stopped attacking, as a real combat plugin would.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use hunter_content::ItemCatalog;
use hunter_core::{BlockPos, EntityCategory, EntityId, EntitySnapshot, ItemStack, Position};
use runtime::{
    Agent, AgentEvent, AgentHandle, AnchorRepository, Capabilities, RuntimeConfig, SimContainer,
    SimWorld, Topic,
};

use crate::config::ConnectTarget;

pub const FIGHT_DURATION: Duration = Duration::from_millis(1500);

/// Name chat lines are attributed to when they carry no sender.
pub const OPERATOR: &str = "operator";

/// One parsed stdin line.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Chat { sender: String, message: String },
    MoveOperator(Position),
    Spawn { name: String, at: Position },
    Where,
    Quit,
}

impl Input {
    /// Parses a line. Blank lines and malformed controls yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(control) = line.strip_prefix('/') {
            let mut words = control.split_whitespace();
            return match words.next()? {
                "move" => position(&mut words).map(Self::MoveOperator),
                "spawn" => {
                    let name = words.next()?.to_string();
                    position(&mut words).map(|at| Self::Spawn { name, at })
                }
                "where" => Some(Self::Where),
                "quit" => Some(Self::Quit),
                _ => None,
            };
        }

        let (sender, message) = match line.split_once(':') {
            Some((sender, message))
                if !sender.is_empty() && !sender.contains(char::is_whitespace) =>
            {
                (sender, message.trim())
            }
            _ => (OPERATOR, line),
        };
        Some(Self::Chat {
            sender: sender.to_string(),
            message: message.to_string(),
        })
    }
}

fn position<'a>(words: &mut impl Iterator<Item = &'a str>) -> Option<Position> {
    let mut axis = || words.next()?.parse::<f64>().ok();
    Some(Position::new(axis()?, axis()?, axis()?))
}

/// Category a spawned mob gets from its name.
pub fn category_of(name: &str) -> EntityCategory {
    match name {
        "zombie" | "skeleton" | "spider" | "creeper" | "husk" | "drowned" | "witch" => {
            EntityCategory::Hostile
        }
        "cow" | "pig" | "sheep" | "chicken" | "rabbit" => EntityCategory::Animal,
        "villager" | "wandering_trader" => EntityCategory::Passive,
        "squid" | "cod" | "salmon" => EntityCategory::WaterCreature,
        _ => EntityCategory::Other,
    }
}

/// Demo world: a stocked chest beside the spawn point, an operator, a few mobs.
pub fn demo_world(name: &str, catalog: &ItemCatalog) -> SimWorld {
    let stock = [
        (0, "cooked_beef", 32),
        (1, "bread", 20),
        (2, "rotten_flesh", 12),
        (3, "iron_sword", 1),
        (4, "iron_helmet", 1),
        (5, "iron_chestplate", 1),
        (6, "shield", 1),
        (7, "stone_pickaxe", 1),
    ];
    let chest: Vec<ItemStack> = stock
        .iter()
        .filter_map(|(slot, item, count)| catalog.stack(*slot, item, *count))
        .collect();

    let mob = |id: u32, name: &str, x: f64, z: f64| {
        EntitySnapshot::new(
            EntityId(id),
            category_of(name),
            Position::new(x, 64.0, z),
            name,
        )
    };

    let mut world = SimWorld::builder()
        .named(name)
        .player(OPERATOR, Position::new(2.0, 64.0, 2.0))
        .container(BlockPos::new(3, 64, -3), SimContainer::chest(chest))
        .entity(mob(100, "zombie", 12.0, 5.0))
        .entity(mob(101, "cow", -8.0, 10.0))
        .entity(mob(102, "skeleton", 24.0, -18.0));
    for (slot, item, count) in [(36, "bread", 4), (12, "bone", 7)] {
        if let Some(stack) = catalog.stack(slot, item, count) {
            world = world.stack(stack);
        }
    }
    world.build()
}

/// Runs the agent until stdin closes, `/quit`, or ctrl-c.
pub async fn run(
    target: &ConnectTarget,
    config: RuntimeConfig,
    catalog: ItemCatalog,
    anchors: impl AnchorRepository + 'static,
) -> Result<()> {
    info!(
        host = %target.host,
        port = target.port,
        name = %target.name,
        "Starting offline session against the simulated world"
    );

    let world = demo_world(&target.name, &catalog);
    let agent = Agent::builder()
        .config(config)
        .capabilities(Capabilities::from_backend(Arc::new(world.clone())))
        .anchors(anchors)
        .catalog(catalog)
        .build()
        .await
        .context("failed to start agent")?;
    let handle = agent.handle();

    let fights = tokio::spawn(resolve_fights(world.clone(), handle.clone()));
    let chat = tokio::spawn(echo_chat(handle.clone(), target.name.clone()));

    let reason = tokio::select! {
        result = read_input(&world, &handle) => match result {
            Ok(()) => "input closed".to_string(),
            Err(error) => format!("input failed: {error:#}"),
        },
        _ = tokio::signal::ctrl_c() => "interrupted".to_string(),
    };

    info!(%reason, "Ending session");
    agent.shutdown(&reason).await?;
    fights.abort();
    chat.abort();
    Ok(())
}

async fn read_input(world: &SimWorld, handle: &AgentHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(input) = Input::parse(&line) else {
            continue;
        };
        match input {
            Input::Chat { sender, message } => handle.chat(sender, message).await?,
            Input::MoveOperator(at) => {
                world.move_player(OPERATOR, at);
                info!(%at, "Operator moved");
            }
            Input::Spawn { name, at } => {
                let id = world.entity_ids().iter().map(|id| id.0).max().unwrap_or(0) + 1;
                world.spawn(EntitySnapshot::new(EntityId(id), category_of(&name), at, &name));
                info!(id, %name, %at, "Spawned");
            }
            Input::Where => {
                let status = handle.status().await?;
                info!(
                    position = %world.position(),
                    mode = %status.mode,
                    busy = status.busy,
                    transit = ?status.transit,
                    "Status"
                );
            }
            Input::Quit => break,
        }
    }
    Ok(())
}

/// Ends each engagement after a short fight.
async fn resolve_fights(world: SimWorld, handle: AgentHandle) {
    let mut combat = handle.subscribe(Topic::Combat);
    loop {
        match combat.recv().await {
            Ok(AgentEvent::Engaged { target, name, .. }) => {
                tokio::time::sleep(FIGHT_DURATION).await;
                if world.current_target() == Some(target) {
                    world.resolve_combat();
                    info!(%target, %name, "Target defeated");
                    if handle.notify_stopped_attacking().await.is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Combat events dropped"),
            Err(RecvError::Closed) => break,
        }
    }
}

/// Prints what the agent says.
async fn echo_chat(handle: AgentHandle, name: String) {
    let mut chat = handle.subscribe(Topic::Chat);
    loop {
        match chat.recv().await {
            Ok(AgentEvent::Notified(text)) => println!("<{name}> {text}"),
            Ok(_) => {}
            Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_come_from_the_operator() {
        assert_eq!(
            Input::parse("  guard \n"),
            Some(Input::Chat {
                sender: OPERATOR.into(),
                message: "guard".into()
            })
        );
        assert_eq!(
            Input::parse("Steve: come"),
            Some(Input::Chat {
                sender: "Steve".into(),
                message: "come".into()
            })
        );
        assert_eq!(Input::parse("   "), None);
    }

    #[test]
    fn controls_need_complete_coordinates() {
        assert_eq!(
            Input::parse("/move 1 64 -2.5"),
            Some(Input::MoveOperator(Position::new(1.0, 64.0, -2.5)))
        );
        assert_eq!(
            Input::parse("/spawn zombie 4 64 4"),
            Some(Input::Spawn {
                name: "zombie".into(),
                at: Position::new(4.0, 64.0, 4.0)
            })
        );
        assert_eq!(Input::parse("/move 1 64"), None);
        assert_eq!(Input::parse("/dance"), None);
        assert_eq!(Input::parse("/quit"), Some(Input::Quit));
    }

    #[test]
    fn demo_world_has_a_reachable_chest() {
        let catalog = ItemCatalog::builtin().unwrap();
        let world = demo_world("hunter", &catalog);

        let stacks = world.container_stacks(BlockPos::new(3, 64, -3));
        assert_eq!(stacks.len(), 8);
        assert_eq!(world.name(), "hunter");
        assert_eq!(world.entity_ids().len(), 3);
    }
}
