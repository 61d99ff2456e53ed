//! Minimal in-memory [`Host`] for unit tests.

use std::collections::BTreeMap;

use crate::{Host, HostError, HostResult, Rect, WindowId};

#[derive(Debug, Clone)]
pub(crate) struct FakeWindow {
    pub class: String,
    pub group: String,
    pub floating: bool,
    pub dialog: bool,
    pub minimized: bool,
    pub opacity: f64,
    pub size: Option<(i32, i32)>,
    pub position: Option<(i32, i32)>,
}

#[derive(Debug)]
pub(crate) struct FakeHost {
    pub windows: BTreeMap<WindowId, FakeWindow>,
    pub history: Vec<WindowId>,
    pub focused: Option<WindowId>,
    pub group: String,
    pub screen: Rect,
    /// Raise calls in order; the last entry is on top.
    pub raised: Vec<WindowId>,
    pub focus_calls: usize,
    pub minimize_calls: usize,
    next_id: u64,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            history: Vec::new(),
            focused: None,
            group: "1".into(),
            screen: Rect::new(0, 0, 1920, 1080),
            raised: Vec::new(),
            focus_calls: 0,
            minimize_calls: 0,
            next_id: 1,
        }
    }

    pub fn add(&mut self, class: &str) -> WindowId {
        self.insert(class, false)
    }

    pub fn add_floating(&mut self, class: &str) -> WindowId {
        self.insert(class, true)
    }

    pub fn add_dialog(&mut self, class: &str) -> WindowId {
        let id = self.insert(class, false);
        if let Some(w) = self.windows.get_mut(&id) {
            w.dialog = true;
        }
        id
    }

    fn insert(&mut self, class: &str, floating: bool) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.windows.insert(
            id,
            FakeWindow {
                class: class.into(),
                group: self.group.clone(),
                floating,
                dialog: false,
                minimized: false,
                opacity: 1.0,
                size: None,
                position: None,
            },
        );
        id
    }

    /// Focuses `id` the way a user would, recording history.
    pub fn user_focus(&mut self, id: WindowId) {
        self.history.retain(|&h| h != id);
        self.history.push(id);
        self.focused = Some(id);
    }

    pub fn win(&self, id: WindowId) -> &FakeWindow {
        &self.windows[&id]
    }

    pub fn rect_of(&self, id: WindowId) -> Option<Rect> {
        let w = self.windows.get(&id)?;
        let (x, y) = w.position?;
        let (width, height) = w.size?;
        Some(Rect::new(x, y, width, height))
    }

    fn get(&self, id: WindowId) -> HostResult<&FakeWindow> {
        self.windows.get(&id).ok_or(HostError::UnknownWindow(id))
    }

    fn get_mut(&mut self, id: WindowId) -> HostResult<&mut FakeWindow> {
        self.windows.get_mut(&id).ok_or(HostError::UnknownWindow(id))
    }
}

impl Host for FakeHost {
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
        Ok(self.history.clone())
    }

    fn group_windows(&self) -> HostResult<Vec<WindowId>> {
        Ok(self
            .windows
            .iter()
            .filter(|(_, w)| w.group == self.group)
            .map(|(&id, _)| id)
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
        self.get_mut(id)?.size = Some((width, height));
        Ok(())
    }

    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> HostResult<()> {
        self.get_mut(id)?.position = Some((x, y));
        Ok(())
    }

    fn raise(&mut self, id: WindowId) -> HostResult<()> {
        self.get(id)?;
        self.raised.push(id);
        Ok(())
    }

    fn set_minimized(&mut self, id: WindowId, minimized: bool) -> HostResult<()> {
        self.get_mut(id)?.minimized = minimized;
        self.minimize_calls += 1;
        Ok(())
    }

    fn set_floating(&mut self, id: WindowId, floating: bool) -> HostResult<()> {
        self.get_mut(id)?.floating = floating;
        Ok(())
    }

    fn set_opacity(&mut self, id: WindowId, opacity: f64) -> HostResult<()> {
        self.get_mut(id)?.opacity = opacity;
        Ok(())
    }

    fn move_to_group(&mut self, id: WindowId, group: &str) -> HostResult<()> {
        self.get_mut(id)?.group = group.into();
        Ok(())
    }

    fn focus(&mut self, id: Option<WindowId>) -> HostResult<()> {
        self.focus_calls += 1;
        if let Some(id) = id {
            self.get(id)?;
            self.user_focus(id);
        } else {
            self.focused = None;
        }
        Ok(())
    }
}
