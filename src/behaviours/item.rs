//=========================================================================
// Items
//=========================================================================
//
// Item variants share one display contract. `ItemLogger` shows whatever
// item its entity carries without knowing the variant.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::console::Console;
use crate::core::scene::{Behaviour, Context};

//=== Item ================================================================

/// A displayable item.
///
/// Implementations must accept any console in any state: `display` has no
/// preconditions and only appends lines.
pub trait Item: Send {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// Writes a presentation of the item to `console`.
    fn display(&self, console: &mut Console);
}

//=== ItemDetails =========================================================

/// Name and description, fixed once the item is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    name: String,
    description: String,
}

impl ItemDetails {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Default for ItemDetails {
    fn default() -> Self {
        Self::new("New Item Name", "New Item Description")
    }
}

//=== Weapon ==============================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Weapon {
    details: ItemDetails,
    damage: u32,
}

impl Weapon {
    pub fn new(details: ItemDetails, damage: u32) -> Self {
        Self { details, damage }
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }
}

impl Item for Weapon {
    fn name(&self) -> &str {
        self.details.name()
    }

    fn description(&self) -> &str {
        self.details.description()
    }

    fn display(&self, console: &mut Console) {
        console.print(format!("[Weapon] {} ({} damage)", self.name(), self.damage));
        console.print(self.description());
    }
}

//=== Potion ==============================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Potion {
    details: ItemDetails,
    restore: u32,
}

impl Potion {
    pub fn new(details: ItemDetails, restore: u32) -> Self {
        Self { details, restore }
    }

    pub fn restore(&self) -> u32 {
        self.restore
    }
}

impl Item for Potion {
    fn name(&self) -> &str {
        self.details.name()
    }

    fn description(&self) -> &str {
        self.details.description()
    }

    fn display(&self, console: &mut Console) {
        console.print(format!(
            "[Potion] {}: {} (restores {})",
            self.name(),
            self.description(),
            self.restore
        ));
    }
}

//=== ItemLogger ==========================================================

/// Displays its entity's `dyn Item` once, at start.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemLogger;

impl Behaviour for ItemLogger {
    fn on_start(&mut self, ctx: &mut Context<'_>) {
        match ctx.world.capability::<dyn Item>(ctx.entity) {
            Some(item) => item.display(ctx.console),
            None => debug!("Entity {} carries no item", ctx.entity),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
