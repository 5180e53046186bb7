/// One of the six boot-mode menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    DevWarning,
    Dev,
    ToNorm,
    Recovery,
    ToDev,
    Languages,
}

/// A selectable item. The same variant can appear in more than one menu
/// (`Confirm` in both `ToNorm` and `ToDev`, `Cancel` in three); callers that
/// need to disambiguate look at `MenuState::current_menu` alongside the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Options,
    DebugInfo,
    EnableVerified,
    PowerOff,
    Language,
    Network,
    Legacy,
    Usb,
    Disk,
    Cancel,
    Confirm,
    ToDev,
    UsEnglish,
}

/// The kernel source an unattended developer-mode boot falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultBoot {
    Disk,
    Usb,
    Legacy,
}

pub fn items(menu: Menu) -> &'static [Item] {
    use Item::*;
    match menu {
        Menu::DevWarning => &[Options, DebugInfo, EnableVerified, PowerOff, Language],
        Menu::Dev => &[Network, Legacy, Usb, Disk, Cancel, PowerOff, Language],
        Menu::ToNorm => &[Confirm, Cancel, PowerOff, Language],
        Menu::Recovery => &[ToDev, DebugInfo, PowerOff, Language],
        Menu::ToDev => &[Confirm, Cancel, PowerOff, Language],
        Menu::Languages => &[UsEnglish],
    }
}

fn index_of(menu: Menu, item: Item) -> usize {
    items(menu)
        .iter()
        .position(|i| *i == item)
        .expect("item must belong to its menu")
}

/// Explicit, caller-owned menu state. Never module-scoped or global: a
/// developer/recovery flow is handed one of these and threads it through
/// its own loop, which makes the flow reentrant-safe and directly testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub current_menu: Menu,
    pub previous_menu: Menu,
    pub current_index: usize,
    pub selected: bool,
    pub default_boot: DefaultBoot,
}

impl MenuState {
    pub fn new(menu: Menu, default_boot: DefaultBoot) -> Self {
        Self {
            current_menu: menu,
            previous_menu: menu,
            current_index: 0,
            selected: false,
            default_boot,
        }
    }

    pub fn current_item(&self) -> Item {
        items(self.current_menu)[self.current_index]
    }

    pub fn size(&self) -> usize {
        items(self.current_menu).len()
    }

    /// Moves the cursor up, clamped at 0 (no wraparound).
    pub fn nav_up(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Moves the cursor down, clamped at the last item (no wraparound).
    pub fn nav_down(&mut self) {
        if self.current_index + 1 < self.size() {
            self.current_index += 1;
        }
    }

    fn set_menu(&mut self, menu: Menu, index: usize) {
        self.previous_menu = self.current_menu;
        self.current_menu = menu;
        self.current_index = index;
        self.selected = false;
    }

    fn power_off_index(menu: Menu) -> usize {
        index_of(menu, Item::PowerOff)
    }
}

/// The result of committing the currently selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The generic transition table fully handled this commit; the state
    /// has already been updated to reflect it.
    MenuChanged,
    /// Any menu's Power Off item was committed.
    Shutdown,
    /// No table entry covers this (menu, item) pair; the flow that owns
    /// `state.current_menu` must interpret `item` itself (Legacy/USB/Disk
    /// boot attempts, Debug Info, or the Confirm action on `ToNorm`/`ToDev`).
    Unhandled(Item),
}

/// Runs the shared per-item transition table described for the boot-mode
/// menus. Mirrors the source's `vb2_update_menu`, with the LANGUAGES
/// fall-through resolved to always restore `previous_menu` (see the design
/// notes on the ambiguous missing `break` in the original switch).
pub fn commit(state: &mut MenuState) -> CommitOutcome {
    let menu = state.current_menu;
    let item = state.current_item();

    if menu == Menu::Languages {
        let previous = state.previous_menu;
        state.set_menu(previous, 0);
        return CommitOutcome::MenuChanged;
    }

    if item == Item::PowerOff {
        return CommitOutcome::Shutdown;
    }

    if item == Item::Language {
        state.set_menu(Menu::Languages, 0);
        return CommitOutcome::MenuChanged;
    }

    match (menu, item) {
        (Menu::DevWarning, Item::Options) => {
            let dev_index = index_of(
                Menu::Dev,
                match state.default_boot {
                    DefaultBoot::Disk => Item::Disk,
                    DefaultBoot::Usb => Item::Usb,
                    DefaultBoot::Legacy => Item::Legacy,
                },
            );
            state.set_menu(Menu::Dev, dev_index);
            CommitOutcome::MenuChanged
        }
        (Menu::DevWarning, Item::EnableVerified) => {
            let index = MenuState::power_off_index(Menu::ToNorm);
            state.set_menu(Menu::ToNorm, index);
            CommitOutcome::MenuChanged
        }
        (Menu::Dev, Item::Cancel) => {
            let index = MenuState::power_off_index(Menu::DevWarning);
            state.set_menu(Menu::DevWarning, index);
            CommitOutcome::MenuChanged
        }
        (Menu::ToNorm, Item::Cancel) => {
            let index = MenuState::power_off_index(Menu::DevWarning);
            state.set_menu(Menu::DevWarning, index);
            CommitOutcome::MenuChanged
        }
        (Menu::Recovery, Item::ToDev) => {
            let index = MenuState::power_off_index(Menu::ToDev);
            state.set_menu(Menu::ToDev, index);
            CommitOutcome::MenuChanged
        }
        (Menu::ToDev, Item::Cancel) => {
            let index = MenuState::power_off_index(Menu::Recovery);
            state.set_menu(Menu::Recovery, index);
            CommitOutcome::MenuChanged
        }
        (_, item) => CommitOutcome::Unhandled(item),
    }
}

fn item_label(item: Item) -> &'static str {
    match item {
        Item::Options => "Options",
        Item::DebugInfo => "Debug Info",
        Item::EnableVerified => "Enable Verified Boot",
        Item::PowerOff => "Power Off",
        Item::Language => "Language",
        Item::Network => "Network",
        Item::Legacy => "Legacy",
        Item::Usb => "USB",
        Item::Disk => "Disk",
        Item::Cancel => "Cancel",
        Item::Confirm => "Confirm",
        Item::ToDev => "Enable Developer Mode",
        Item::UsEnglish => "US English",
    }
}

/// Redraws the current menu's item list, highlighting the selected row.
/// Errors from the display are swallowed: a stuck display should not stall
/// the boot flow.
pub fn render(display: &mut impl crate::collaborators::Display, state: &MenuState) {
    for (i, item) in items(state.current_menu).iter().enumerate() {
        let _ = display.show_text(0, i as u32, item_label(*item), i == state.current_index);
    }
}
