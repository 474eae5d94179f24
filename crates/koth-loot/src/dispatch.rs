//! Reward dispatch: runs a loot's commands for the capper of an event

use std::sync::Arc;

use koth_core::{CaptureEvent, CapperKind, ConsoleSender, LootSettings};
use rand::Rng;

use crate::{FACTION_PLACEHOLDER, Loot, PLAYER_PLACEHOLDER};

/// Commands issued by one dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Command templates in the order they were picked
    pub selected: Vec<String>,
    /// Concrete command lines sent to the console
    pub issued: Vec<String>,
}

impl DispatchReport {
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

/// Sends loot commands to the console.
///
/// Stateless between calls: randomness comes from the caller or the thread
/// RNG, so one dispatcher can serve any number of events.
pub struct RewardDispatcher {
    console: Arc<dyn ConsoleSender>,
    commands_enabled: bool,
    /// Draw count for events that report a loot amount of 0
    default_amount: usize,
}

impl RewardDispatcher {
    pub fn new(console: Arc<dyn ConsoleSender>, commands_enabled: bool) -> Self {
        Self {
            console,
            commands_enabled,
            default_amount: LootSettings::default().default_amount,
        }
    }

    pub fn from_settings(console: Arc<dyn ConsoleSender>, settings: &LootSettings) -> Self {
        Self {
            default_amount: settings.default_amount,
            ..Self::new(console, settings.cmd_enabled)
        }
    }

    pub fn default_amount(&self) -> usize {
        self.default_amount
    }

    pub fn commands_enabled(&self) -> bool {
        self.commands_enabled
    }

    pub fn set_commands_enabled(&mut self, enabled: bool) {
        self.commands_enabled = enabled;
    }

    /// Run the loot commands using the thread RNG
    pub fn dispatch(
        &self,
        event: &dyn CaptureEvent,
        capper: Option<&CapperKind>,
        loot: &Loot,
    ) -> DispatchReport {
        self.dispatch_with_rng(event, capper, loot, &mut rand::rng())
    }

    /// Run the loot commands drawing random picks from `rng`
    pub fn dispatch_with_rng<R: Rng>(
        &self,
        event: &dyn CaptureEvent,
        capper: Option<&CapperKind>,
        loot: &Loot,
        rng: &mut R,
    ) -> DispatchReport {
        self.dispatch_with(event, capper, loot, |len| rng.random_range(0..len))
    }

    /// Run the loot commands with an explicit picker.
    ///
    /// `pick(len)` must return an index below `len`. In random mode the pick
    /// is taken over the full command list each round, while exhaustion is
    /// tracked on a separate pool that loses one occurrence of the picked
    /// command per round. Duplicate picks therefore run a command again, and
    /// a loot with duplicated commands can drain its pool early.
    pub fn dispatch_with(
        &self,
        event: &dyn CaptureEvent,
        capper: Option<&CapperKind>,
        loot: &Loot,
        mut pick: impl FnMut(usize) -> usize,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();

        if !self.commands_enabled {
            return report;
        }
        let Some(capper) = capper else {
            return report;
        };

        let commands = loot.commands();

        if !loot.use_random() {
            for command in commands {
                self.send_command(command, event, capper, &mut report);
            }
            return report;
        }

        let mut pool: Vec<&str> = commands.iter().map(String::as_str).collect();
        if pool.is_empty() {
            return report;
        }

        let amount = match event.loot_amount() {
            0 => self.default_amount,
            n => n,
        };
        for _ in 0..amount {
            if pool.is_empty() {
                break;
            }
            let command = commands[pick(commands.len())].as_str();
            if let Some(pos) = pool.iter().position(|c| *c == command) {
                pool.remove(pos);
            }
            self.send_command(command, event, capper, &mut report);
        }

        report
    }

    fn send_command(
        &self,
        template: &str,
        event: &dyn CaptureEvent,
        capper: &CapperKind,
        report: &mut DispatchReport,
    ) {
        if template.trim().is_empty() {
            log::warn!("[Loot] Blank command in the loot for {}", event.name());
        }
        report.selected.push(template.to_string());

        let mut players = capper.available_players(event);

        if template.contains(PLAYER_PLACEHOLDER) {
            for player in &players {
                self.issue(template.replace(PLAYER_PLACEHOLDER, &player.name), report);
            }
        } else if template.contains(FACTION_PLACEHOLDER) {
            let online = capper.all_online_players();
            players.retain(|p| online.contains(p));
            for player in &players {
                self.issue(template.replace(FACTION_PLACEHOLDER, &player.name), report);
            }
        } else {
            self.issue(template.to_string(), report);
        }
    }

    fn issue(&self, command: String, report: &mut DispatchReport) {
        log::debug!("[Loot] Console: {}", command);
        self.console.dispatch_console(&command);
        report.issued.push(command);
    }
}
