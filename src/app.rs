use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::{Catalog, EMBEDDED_CONTENT};
use crate::economy::Wallet;
use crate::error::GameError;
use crate::inventory::{Inventory, SkinInstance};
use crate::opening::CaseOpening;
use crate::upgrade::{UpgradeOutcome, UpgradeWheel};

const MAX_MESSAGES: usize = 6;
const MAX_ADMIN_DIGITS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Cases,
    Upgrade,
    Inventory,
    Profile,
}

impl PaneFocus {
    fn next(self) -> Self {
        match self {
            PaneFocus::Cases => PaneFocus::Upgrade,
            PaneFocus::Upgrade => PaneFocus::Inventory,
            PaneFocus::Inventory => PaneFocus::Profile,
            PaneFocus::Profile => PaneFocus::Cases,
        }
    }

    fn prev(self) -> Self {
        match self {
            PaneFocus::Cases => PaneFocus::Profile,
            PaneFocus::Upgrade => PaneFocus::Cases,
            PaneFocus::Inventory => PaneFocus::Upgrade,
            PaneFocus::Profile => PaneFocus::Inventory,
        }
    }
}

pub struct App {
    pub focus: PaneFocus,
    pub should_quit: bool,
    pub catalog: Catalog,
    pub wallet: Wallet,
    pub inventory: Inventory,
    pub opening: CaseOpening,
    pub wheel: UpgradeWheel,
    pub case_cursor: usize,
    pub stake_cursor: usize,
    pub inventory_scroll: usize,
    pub admin_input: String,
    pub messages: VecDeque<String>,
    rng: StdRng,
}

impl App {
    pub fn new() -> Result<Self> {
        let (catalog, session) = Catalog::from_json(EMBEDDED_CONTENT)?;
        Ok(Self::assemble(
            catalog,
            session.starting_balance,
            StdRng::from_entropy(),
        ))
    }

    fn assemble(catalog: Catalog, starting_balance: u64, rng: StdRng) -> Self {
        Self {
            focus: PaneFocus::Cases,
            should_quit: false,
            catalog,
            wallet: Wallet::new(starting_balance),
            inventory: Inventory::new(),
            opening: CaseOpening::new(),
            wheel: UpgradeWheel::new(),
            case_cursor: 0,
            stake_cursor: 0,
            inventory_scroll: 0,
            admin_input: String::new(),
            messages: VecDeque::new(),
            rng,
        }
    }

    pub fn on_tick(&mut self, dt: Duration) {
        if let Some(won) = self.opening.tick(dt, &mut self.inventory, &mut self.rng) {
            self.push_message(format!(
                "{} {} dropped ({}, {}₵)",
                won.icon,
                won.name,
                won.rarity.label(),
                won.price
            ));
        }
        if let Some(outcome) = self.wheel.tick(dt, &mut self.inventory, &mut self.rng) {
            match outcome {
                UpgradeOutcome::Escalated(skin) => self.push_message(format!(
                    "✦ {} landed ({}, {}₵)",
                    skin.name,
                    skin.rarity.label(),
                    skin.price
                )),
                UpgradeOutcome::Lost => {
                    self.push_message("The wheel kept the stake".to_string());
                }
            }
        }
    }

    /// Starts opening the given case. The price is debited up front; the
    /// drop arrives when the reveal finishes.
    pub fn open_case(&mut self, case_id: &str) -> Result<(), GameError> {
        let case = self
            .catalog
            .case(case_id)
            .ok_or_else(|| GameError::not_found("case", case_id))?;
        self.opening.begin(case, &mut self.wallet)
    }

    /// Clears a resolved drop off the showcase, if there is one.
    pub fn collect(&mut self) -> Option<SkinInstance> {
        self.opening.collect()
    }

    /// Stakes an owned skin on the wheel. The skin leaves the inventory
    /// immediately and only comes back improved.
    pub fn start_upgrade(&mut self, uid: &str) -> Result<(), GameError> {
        self.wheel.begin(uid, &mut self.inventory)?;
        self.clamp_selection();
        Ok(())
    }

    /// Clears a settled spin off the wheel, if there is one.
    pub fn reset_upgrade(&mut self) -> Option<UpgradeOutcome> {
        self.wheel.reset()
    }

    /// Admin top-up. Zero and negative amounts are rejected.
    pub fn admin_credit(&mut self, amount: i64) -> Result<(), GameError> {
        if amount <= 0 {
            return Err(GameError::invalid_input(
                "credit amount must be a positive number",
            ));
        }
        self.wallet.credit(amount as u64);
        Ok(())
    }

    fn push_message(&mut self, msg: impl Into<String>) {
        self.messages.push_front(msg.into());
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_back();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.inventory.len();
        if len == 0 {
            self.stake_cursor = 0;
            self.inventory_scroll = 0;
            return;
        }
        if self.stake_cursor >= len {
            self.stake_cursor = len - 1;
        }
        if self.inventory_scroll >= len {
            self.inventory_scroll = len - 1;
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q' | 'Q')) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
            }
            _ => match self.focus {
                PaneFocus::Cases => self.handle_cases_input(key),
                PaneFocus::Upgrade => self.handle_upgrade_input(key),
                PaneFocus::Inventory => self.handle_inventory_input(key),
                PaneFocus::Profile => self.handle_profile_input(key),
            },
        }
    }

    fn handle_cases_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.case_cursor = wrap_prev(self.case_cursor, self.catalog.cases().len());
            }
            KeyCode::Down => {
                self.case_cursor = wrap_next(self.case_cursor, self.catalog.cases().len());
            }
            KeyCode::Enter => self.activate_selected_case(),
            _ => {}
        }
    }

    fn activate_selected_case(&mut self) {
        if let Some(won) = self.collect() {
            self.push_message(format!("{} tucked into the locker", won.name));
            return;
        }
        let Some(case) = self.catalog.cases().get(self.case_cursor) else {
            return;
        };
        let case_id = case.id.clone();
        let case_name = case.name.clone();
        let price = case.price;
        match self.open_case(&case_id) {
            Ok(()) => self.push_message(format!("Cracking {} (-{}₵)", case_name, price)),
            Err(err) => self.push_message(err.to_string()),
        }
    }

    fn handle_upgrade_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.stake_cursor = wrap_prev(self.stake_cursor, self.inventory.len());
            }
            KeyCode::Down => {
                self.stake_cursor = wrap_next(self.stake_cursor, self.inventory.len());
            }
            KeyCode::Enter => self.activate_upgrade(),
            _ => {}
        }
    }

    fn activate_upgrade(&mut self) {
        if self.reset_upgrade().is_some() {
            self.push_message("Wheel re-armed".to_string());
            return;
        }
        let Some(stake) = self.inventory.iter().nth(self.stake_cursor) else {
            self.push_message("Nothing in the locker to stake".to_string());
            return;
        };
        let uid = stake.uid.clone();
        let name = stake.name.clone();
        match self.start_upgrade(&uid) {
            Ok(()) => self.push_message(format!("{} staked on the wheel", name)),
            Err(err) => self.push_message(err.to_string()),
        }
    }

    fn handle_inventory_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                if self.inventory_scroll > 0 {
                    self.inventory_scroll -= 1;
                }
            }
            KeyCode::Down => {
                if self.inventory_scroll + 1 < self.inventory.len() {
                    self.inventory_scroll += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_profile_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.admin_input.len() < MAX_ADMIN_DIGITS {
                    self.admin_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.admin_input.pop();
            }
            KeyCode::Esc => self.admin_input.clear(),
            KeyCode::Enter => self.apply_admin_credit(),
            _ => {}
        }
    }

    fn apply_admin_credit(&mut self) {
        if self.admin_input.is_empty() {
            self.push_message("Type an amount first".to_string());
            return;
        }
        let raw = std::mem::take(&mut self.admin_input);
        match raw.parse::<i64>() {
            Ok(amount) => match self.admin_credit(amount) {
                Ok(()) => self.push_message(format!("Treasury credit: +{}₵", amount)),
                Err(err) => self.push_message(err.to_string()),
            },
            Err(_) => self.push_message(format!("'{}' is not a whole number", raw)),
        }
    }
}

fn wrap_next(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

fn wrap_prev(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn format_countdown(remaining: Duration) -> String {
    format!("{:.1}s", remaining.as_secs_f64())
}
