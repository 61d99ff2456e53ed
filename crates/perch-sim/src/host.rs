//! In-memory window manager.
//!
//! `SimHost` keeps just enough state to drive the controllers: a window
//! table, per-group focus histories, a stacking order and the active
//! screen. Changes that a real window manager would announce through its
//! hooks are queued as [`HostEvent`]s and handed out by [`SimHost::poll_event`]
//! once the current handler has returned.

use std::collections::{BTreeMap, HashMap, VecDeque};

use perch_core::{Host, HostError, HostEvent, HostResult, Rect, WindowId};
use serde::Serialize;

pub const DEFAULT_GROUP: &str = "1";

/// A window known to the simulated host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimWindow {
    pub id: WindowId,
    pub title: String,
    pub class: String,
    pub group: String,
    pub floating: bool,
    /// Dialog type or transient for another window.
    pub dialog: bool,
    pub minimized: bool,
    pub opacity: f64,
    pub rect: Rect,
}

#[derive(Debug)]
pub struct SimHost {
    windows: BTreeMap<WindowId, SimWindow>,
    /// Bottom to top.
    stacking: Vec<WindowId>,
    /// Per group, most recently focused last.
    histories: HashMap<String, Vec<WindowId>>,
    focused: Option<WindowId>,
    group: String,
    screen: Rect,
    pending: VecDeque<HostEvent>,
    next_id: u64,
}

impl SimHost {
    pub fn new(screen: Rect) -> Self {
        Self {
            windows: BTreeMap::new(),
            stacking: Vec::new(),
            histories: HashMap::new(),
            focused: None,
            group: DEFAULT_GROUP.into(),
            screen,
            pending: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Maps a new window on the current group and focuses it.
    ///
    /// New tiled windows fill the screen; floating ones start centered at
    /// half size.
    pub fn spawn(&mut self, title: &str, class: &str, floating: bool) -> WindowId {
        self.map(title, class, floating, false)
    }

    /// Maps a dialog window. It arrives tiled; floating it is up to the
    /// `Created` handler.
    pub fn spawn_dialog(&mut self, title: &str, class: &str) -> WindowId {
        self.map(title, class, false, true)
    }

    fn map(&mut self, title: &str, class: &str, floating: bool, dialog: bool) -> WindowId {
        let id = WindowId(0x100 + self.next_id);
        self.next_id += 1;

        let rect = if floating {
            centered_half(self.screen)
        } else {
            self.screen
        };
        self.windows.insert(
            id,
            SimWindow {
                id,
                title: title.into(),
                class: class.into(),
                group: self.group.clone(),
                floating,
                dialog,
                minimized: false,
                opacity: 1.0,
                rect,
            },
        );
        self.stacking.push(id);
        self.pending.push_back(HostEvent::Created { window: id });
        self.focus_window(id);
        id
    }

    /// Unmaps a window. Focus is cleared if it held focus.
    pub fn close(&mut self, id: WindowId) -> HostResult<()> {
        self.windows.remove(&id).ok_or(HostError::UnknownWindow(id))?;
        self.stacking.retain(|&w| w != id);
        for history in self.histories.values_mut() {
            history.retain(|&w| w != id);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.pending.push_back(HostEvent::Destroyed { window: id });
        Ok(())
    }

    /// Switches the screen to `name`, focusing that group's last window.
    pub fn switch_group(&mut self, name: &str) {
        if self.group == name {
            return;
        }
        self.group = name.into();
        self.pending.push_back(HostEvent::GroupChanged);
        let last = self
            .histories
            .get(name)
            .and_then(|h| h.last().copied());
        match last {
            Some(id) => self.focus_window(id),
            None => self.focused = None,
        }
    }

    /// Announces a layout switch on the current group.
    pub fn set_layout(&mut self, name: &str) {
        self.pending
            .push_back(HostEvent::LayoutChanged { name: name.into() });
    }

    /// Next queued hook notification.
    pub fn poll_event(&mut self) -> Option<HostEvent> {
        self.pending.pop_front()
    }

    /// Drops queued notifications. Returns how many were dropped.
    pub fn discard_events(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Finds the most recently spawned window with `title`.
    pub fn find(&self, title: &str) -> Option<WindowId> {
        self.windows
            .values()
            .rev()
            .find(|w| w.title == title)
            .map(|w| w.id)
    }

    pub fn window(&self, id: WindowId) -> Option<&SimWindow> {
        self.windows.get(&id)
    }

    /// All windows in stacking order, bottom first.
    pub fn windows(&self) -> impl Iterator<Item = &SimWindow> {
        self.stacking.iter().filter_map(|id| self.windows.get(id))
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen
    }

    /// Id of the topmost window, if any.
    pub fn top(&self) -> Option<WindowId> {
        self.stacking.last().copied()
    }

    fn get(&self, id: WindowId) -> HostResult<&SimWindow> {
        self.windows.get(&id).ok_or(HostError::UnknownWindow(id))
    }

    fn get_mut(&mut self, id: WindowId) -> HostResult<&mut SimWindow> {
        self.windows.get_mut(&id).ok_or(HostError::UnknownWindow(id))
    }

    fn focus_window(&mut self, id: WindowId) {
        let Some(group) = self.windows.get(&id).map(|w| w.group.clone()) else {
            return;
        };
        let history = self.histories.entry(group).or_default();
        history.retain(|&w| w != id);
        history.push(id);
        self.focused = Some(id);
        self.pending.push_back(HostEvent::Focused { window: id });
    }
}

fn centered_half(s: Rect) -> Rect {
    Rect::new(s.x + s.width / 4, s.y + s.height / 4, s.width / 2, s.height / 2)
}

impl Host for SimHost {
    fn screen(&self) -> HostResult<Rect> {
        Ok(self.screen)
    }

    fn current_window(&self) -> Option<WindowId> {
        self.focused
    }

    fn current_group(&self) -> String {
        self.group.clone()
    }

    fn focus_history(&self) -> HostResult<Vec<WindowId>> {
        Ok(self.histories.get(&self.group).cloned().unwrap_or_default())
    }

    fn group_windows(&self) -> HostResult<Vec<WindowId>> {
        Ok(self
            .windows()
            .filter(|w| w.group == self.group)
            .map(|w| w.id)
            .collect())
    }

    fn window_class(&self, id: WindowId) -> HostResult<String> {
        Ok(self.get(id)?.class.clone())
    }

    fn window_group(&self, id: WindowId) -> HostResult<String> {
        Ok(self.get(id)?.group.clone())
    }

    fn is_floating(&self, id: WindowId) -> HostResult<bool> {
        Ok(self.get(id)?.floating)
    }

    fn is_minimized(&self, id: WindowId) -> HostResult<bool> {
        Ok(self.get(id)?.minimized)
    }

    fn is_dialog(&self, id: WindowId) -> HostResult<bool> {
        Ok(self.get(id)?.dialog)
    }

    fn opacity(&self, id: WindowId) -> HostResult<f64> {
        Ok(self.get(id)?.opacity)
    }

    fn set_size(&mut self, id: WindowId, width: i32, height: i32) -> HostResult<()> {
        let w = self.get_mut(id)?;
        if !w.floating {
            return Err(HostError::Rejected {
                op: "set_size",
                reason: format!("{id} is tiled"),
            });
        }
        w.rect.width = width;
        w.rect.height = height;
        Ok(())
    }

    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> HostResult<()> {
        let w = self.get_mut(id)?;
        if !w.floating {
            return Err(HostError::Rejected {
                op: "set_position",
                reason: format!("{id} is tiled"),
            });
        }
        w.rect.x = x;
        w.rect.y = y;
        Ok(())
    }

    fn raise(&mut self, id: WindowId) -> HostResult<()> {
        self.get(id)?;
        self.stacking.retain(|&w| w != id);
        self.stacking.push(id);
        Ok(())
    }

    fn set_minimized(&mut self, id: WindowId, minimized: bool) -> HostResult<()> {
        self.get_mut(id)?.minimized = minimized;
        Ok(())
    }

    fn set_floating(&mut self, id: WindowId, floating: bool) -> HostResult<()> {
        let screen = self.screen;
        let w = self.get_mut(id)?;
        if w.floating && !floating {
            w.rect = screen;
        } else if !w.floating && floating {
            w.rect = centered_half(screen);
        }
        w.floating = floating;
        Ok(())
    }

    fn set_opacity(&mut self, id: WindowId, opacity: f64) -> HostResult<()> {
        self.get_mut(id)?.opacity = opacity;
        Ok(())
    }

    fn move_to_group(&mut self, id: WindowId, group: &str) -> HostResult<()> {
        let w = self.get_mut(id)?;
        w.group = group.into();
        for history in self.histories.values_mut() {
            history.retain(|&h| h != id);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        Ok(())
    }

    fn focus(&mut self, id: Option<WindowId>) -> HostResult<()> {
        match id {
            Some(id) => {
                self.get(id)?;
                self.focus_window(id);
            }
            None => self.focused = None,
        }
        Ok(())
    }
}
