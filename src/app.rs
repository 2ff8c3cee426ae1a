//! Application State
//!
//! Central application state management for placedash.

use anyhow::Result;
use crossterm::event::KeyCode;
use placedash::api::http::format_fetch_error;
use placedash::api::PlaceholderClient;
use placedash::cache::QueryCache;
use placedash::config::Config;
use placedash::view::{ActiveView, Route, ViewData, ViewState};
use std::ops::Range;

// =========================================================================
// Configuration Constants
// =========================================================================

/// Default viewport height (will be updated during render based on terminal size)
const DEFAULT_VIEWPORT_HEIGHT: usize = 20;

/// Built-in commands offered in command mode
const COMMANDS: &[&str] = &["back", "dashboard", "posts", "quit", "refresh", "users"];

/// Application modes
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,  // Viewing a route
    Command, // : command input
    Help,    // ? help popup
}

/// Main application state
pub struct App {
    // Data layer
    pub cache: QueryCache<PlaceholderClient>,
    pub api_url: String,

    // Route on screen and its last resolution
    pub active: ActiveView,
    pub view: ViewState<ViewData>,
    pub history: Vec<Route>,

    // Navigation state
    pub selected: usize,
    pub mode: Mode,
    pub filter_text: String,
    pub filter_active: bool,

    // Command input
    pub command_text: String,
    pub command_suggestions: Vec<String>,
    pub command_suggestion_selected: usize,
    pub command_preview: Option<String>,

    // UI state
    pub error_message: Option<String>,

    // Persistent configuration
    pub config: Config,

    // Key press tracking
    pub last_key_press: Option<(KeyCode, std::time::Instant)>,

    // Virtual scrolling
    pub viewport_height: usize,
    pub scroll_offset: usize,
}

impl App {
    pub fn new(client: PlaceholderClient, config: Config, route: Route) -> Self {
        let api_url = client.base_url().to_string();

        Self {
            cache: QueryCache::new(client),
            api_url,
            active: ActiveView::new(route),
            view: ViewState::Loading,
            history: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            filter_text: String::new(),
            filter_active: false,
            command_text: String::new(),
            command_suggestions: Vec::new(),
            command_suggestion_selected: 0,
            command_preview: None,
            error_message: None,
            config,
            last_key_press: None,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            scroll_offset: 0,
        }
    }

    pub fn route(&self) -> Route {
        self.active.route()
    }

    /// Search string applied to the active route
    pub fn search(&self) -> &str {
        if self.route().is_searchable() {
            &self.filter_text
        } else {
            ""
        }
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Re-resolve the active route against the cache.
    ///
    /// Called every tick; missing fetches are started on first sight and
    /// results that landed since the last tick are picked up here. The view
    /// is only derived again when an entry or the search text changed.
    pub fn refresh_view(&mut self) {
        let search = self.search().to_string();
        if let Some(view) = self.active.resolve_changed(&self.cache, &search) {
            self.view = view;
        }

        let count = self.row_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    /// Refetch every key of the active route (R)
    pub fn refresh(&mut self) {
        self.error_message = None;
        self.active.refresh(&self.cache);
        self.refresh_view();
    }

    pub fn row_count(&self) -> usize {
        self.view.data().map(ViewData::row_count).unwrap_or(0)
    }

    /// Generic notice for a failed view, if any
    pub fn view_notice(&self) -> Option<String> {
        self.view.error().map(format_fetch_error)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn next(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.selected = count - 1;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        let count = self.row_count();
        if count > 0 {
            self.selected = (self.selected + page_size).min(count - 1);
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    /// Open `route`, remembering the current one for `back`
    pub fn navigate_to(&mut self, route: Route) {
        let current = self.route();
        if self.active.navigate(route) {
            self.history.push(current);
            self.reset_view_state();
        }
    }

    /// Open a top-level route (1/2/3 and `:` commands), forgetting history
    pub fn navigate_root(&mut self, route: Route) {
        self.history.clear();
        if self.active.navigate(route) {
            self.reset_view_state();
        }
    }

    pub fn navigate_back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.active.navigate(previous);
            self.reset_view_state();
        }
    }

    fn reset_view_state(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
        self.filter_text.clear();
        self.filter_active = false;
        self.error_message = None;
        self.mode = Mode::Normal;
        self.refresh_view();
    }

    /// Route the selected row leads to, if any
    pub fn selected_route(&self) -> Option<Route> {
        match self.view.data()? {
            ViewData::Users { users } => users.get(self.selected).map(|u| Route::UserProfile(u.id)),
            ViewData::UserProfile { posts, .. } => {
                posts.get(self.selected).map(|p| Route::PostDetail(p.id))
            },
            ViewData::Posts { posts } => {
                posts.get(self.selected).map(|row| Route::PostDetail(row.post.id))
            },
            ViewData::Dashboard { .. } | ViewData::PostDetail { .. } => None,
        }
    }

    /// Enter: drill into the selected row
    pub fn open_selected(&mut self) {
        if let Some(route) = self.selected_route() {
            self.navigate_to(route);
        }
    }

    /// u: open the author of the post on screen
    pub fn open_author(&mut self) {
        let author = match self.view.data() {
            Some(ViewData::PostDetail { author, .. }) => author.as_ref().map(|u| u.id),
            _ => return,
        };

        match author {
            Some(id) => self.navigate_to(Route::UserProfile(id)),
            None => self.error_message = Some("Author is unknown".to_string()),
        }
    }

    pub fn get_breadcrumb(&self) -> Vec<String> {
        self.history
            .iter()
            .chain(std::iter::once(&self.active.route()))
            .map(Route::title)
            .collect()
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn start_filter(&mut self) {
        if self.route().is_searchable() {
            self.filter_active = true;
        }
    }

    pub fn apply_filter(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
        self.refresh_view();
    }

    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.apply_filter();
    }

    // =========================================================================
    // Mode Transitions
    // =========================================================================

    pub fn get_available_commands(&self) -> Vec<String> {
        let mut commands: Vec<String> = COMMANDS.iter().map(|s| s.to_string()).collect();

        // Offer the ids visible in the current list as direct jumps
        match self.view.data() {
            Some(ViewData::Users { users }) => {
                commands.extend(users.iter().map(|u| format!("users {}", u.id)));
            },
            Some(ViewData::Posts { posts }) => {
                commands.extend(posts.iter().map(|row| format!("posts {}", row.post.id)));
            },
            _ => {},
        }

        commands
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_text.clear();
        self.command_suggestions = self.get_available_commands();
        self.command_suggestion_selected = 0;
        self.command_preview = None;
    }

    pub fn update_command_suggestions(&mut self) {
        let input = self.command_text.to_lowercase();
        let all_commands = self.get_available_commands();

        if input.is_empty() {
            self.command_suggestions = all_commands;
        } else {
            self.command_suggestions = all_commands
                .into_iter()
                .filter(|cmd| cmd.starts_with(&input))
                .collect();
        }

        if self.command_suggestion_selected >= self.command_suggestions.len() {
            self.command_suggestion_selected = 0;
        }

        self.update_preview();
    }

    fn update_preview(&mut self) {
        self.command_preview = self
            .command_suggestions
            .get(self.command_suggestion_selected)
            .cloned();
    }

    pub fn next_suggestion(&mut self) {
        if !self.command_suggestions.is_empty() {
            self.command_suggestion_selected =
                (self.command_suggestion_selected + 1) % self.command_suggestions.len();
            self.update_preview();
        }
    }

    pub fn prev_suggestion(&mut self) {
        if !self.command_suggestions.is_empty() {
            if self.command_suggestion_selected == 0 {
                self.command_suggestion_selected = self.command_suggestions.len() - 1;
            } else {
                self.command_suggestion_selected -= 1;
            }
            self.update_preview();
        }
    }

    pub fn apply_suggestion(&mut self) {
        if let Some(preview) = &self.command_preview {
            self.command_text = preview.clone();
            self.update_command_suggestions();
        }
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    // =========================================================================
    // Command Execution
    // =========================================================================

    /// Run the typed (or previewed) command. Returns true when the app should quit.
    pub fn execute_command(&mut self) -> Result<bool> {
        let command_text = if self.command_text.is_empty() {
            self.command_preview.clone().unwrap_or_default()
        } else {
            self.command_text.clone()
        };

        let parts: Vec<&str> = command_text.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            return Ok(false);
        };

        match (cmd, parts.get(1)) {
            ("q" | "quit", _) => return Ok(true),
            ("back", _) => self.navigate_back(),
            ("refresh", _) => self.refresh(),
            ("dashboard", None) => self.navigate_root(Route::Dashboard),
            ("users", None) => self.navigate_root(Route::Users),
            ("posts", None) => self.navigate_root(Route::Posts),
            ("users" | "posts", Some(id)) => match id.parse::<u64>() {
                Ok(id) if cmd == "users" => self.navigate_to(Route::UserProfile(id)),
                Ok(id) => self.navigate_to(Route::PostDetail(id)),
                Err(_) => self.error_message = Some(format!("Invalid id: {}", id)),
            },
            _ => match command_text.trim().parse::<Route>() {
                // Accept path forms such as "users/3"
                Ok(route) => self.navigate_to(route),
                Err(_) => self.error_message = Some(format!("Unknown command: {}", cmd)),
            },
        }

        Ok(false)
    }

    /// Remember the route on screen for the next start
    pub fn save_last_view(&mut self) {
        let route = self.route();
        if let Err(e) = self.config.set_last_view(route) {
            tracing::warn!("Failed to save last view to config: {}", e);
        }
    }

    // =========================================================================
    // Virtual Scrolling
    // =========================================================================

    /// Update the viewport height (called from UI during render)
    pub fn update_viewport(&mut self, height: usize) {
        self.viewport_height = height.max(1);
    }

    /// Ensure the selected row is visible in the viewport
    pub fn ensure_visible(&mut self) {
        let count = self.row_count();
        self.scroll_offset = scroll_for(
            self.selected,
            self.scroll_offset,
            self.viewport_height,
            count,
        );
    }

    /// Get the range of visible rows based on scroll offset and viewport
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.scroll_offset;
        let end = (self.scroll_offset + self.viewport_height).min(self.row_count());
        start.min(end)..end
    }
}

/// Scroll offset keeping `selected` at least a small margin away from the
/// viewport edges
fn scroll_for(selected: usize, scroll_offset: usize, viewport_height: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }

    let margin = 2;
    let mut offset = scroll_offset;

    if selected < offset + margin {
        offset = selected.saturating_sub(margin);
    } else if selected >= offset + viewport_height.saturating_sub(margin) {
        offset = selected.saturating_sub(viewport_height.saturating_sub(margin + 1));
    }

    offset.min(count.saturating_sub(viewport_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unreachable port: fetches fail fast with a network error
    fn app(route: Route) -> App {
        let client = PlaceholderClient::new("http://127.0.0.1:9").unwrap();
        App::new(client, Config::default(), route)
    }

    #[test]
    fn test_scroll_top() {
        assert_eq!(scroll_for(0, 5, 10, 100), 0);
    }

    #[test]
    fn test_scroll_follows_selection_down() {
        let offset = scroll_for(50, 30, 10, 100);
        assert!(50 >= offset);
        assert!(50 < offset + 10);
    }

    #[test]
    fn test_scroll_clamped_at_end() {
        assert_eq!(scroll_for(99, 0, 10, 100), 90);
        assert_eq!(scroll_for(3, 0, 10, 5), 0);
        assert_eq!(scroll_for(0, 7, 10, 0), 0);
    }

    #[tokio::test]
    async fn test_navigation_history() {
        let mut app = app(Route::Users);
        app.navigate_to(Route::UserProfile(1));
        app.navigate_to(Route::PostDetail(3));
        assert_eq!(app.get_breadcrumb(), vec!["Users", "User 1", "Post 3"]);

        app.navigate_back();
        assert_eq!(app.route(), Route::UserProfile(1));
        app.navigate_back();
        assert_eq!(app.route(), Route::Users);
        app.navigate_back();
        assert_eq!(app.route(), Route::Users);
    }

    #[tokio::test]
    async fn test_navigating_to_same_route_keeps_history() {
        let mut app = app(Route::Posts);
        app.navigate_to(Route::Posts);
        assert!(app.history.is_empty());
    }

    #[tokio::test]
    async fn test_root_navigation_clears_history() {
        let mut app = app(Route::Users);
        app.navigate_to(Route::UserProfile(2));
        app.navigate_root(Route::Dashboard);
        assert!(app.history.is_empty());
        assert_eq!(app.route(), Route::Dashboard);
    }

    #[tokio::test]
    async fn test_commands() {
        let mut app = app(Route::Dashboard);

        app.command_text = "users 4".into();
        assert!(!app.execute_command().unwrap());
        assert_eq!(app.route(), Route::UserProfile(4));

        app.command_text = "posts/9".into();
        app.execute_command().unwrap();
        assert_eq!(app.route(), Route::PostDetail(9));

        app.command_text = "posts".into();
        app.execute_command().unwrap();
        assert_eq!(app.route(), Route::Posts);
        assert!(app.history.is_empty());

        app.command_text = "albums".into();
        app.execute_command().unwrap();
        assert_eq!(app.error_message.as_deref(), Some("Unknown command: albums"));

        app.command_text = "quit".into();
        assert!(app.execute_command().unwrap());
    }

    #[tokio::test]
    async fn test_filter_only_applies_to_searchable_routes() {
        let mut app = app(Route::Dashboard);
        app.start_filter();
        assert!(!app.filter_active);

        app.navigate_root(Route::Users);
        app.start_filter();
        assert!(app.filter_active);
        app.filter_text.push_str("leanne");
        assert_eq!(app.search(), "leanne");

        app.navigate_to(Route::UserProfile(1));
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn test_command_suggestions_prefix_match() {
        let client = PlaceholderClient::new("http://127.0.0.1:9").unwrap();
        let mut app = App::new(client, Config::default(), Route::Dashboard);
        app.enter_command_mode();
        assert_eq!(app.command_suggestions.len(), COMMANDS.len());

        app.command_text = "po".into();
        app.update_command_suggestions();
        assert_eq!(app.command_suggestions, vec!["posts".to_string()]);
        assert_eq!(app.command_preview.as_deref(), Some("posts"));
    }

    #[test]
    fn test_selection_bounds_without_data() {
        let client = PlaceholderClient::new("http://127.0.0.1:9").unwrap();
        let mut app = App::new(client, Config::default(), Route::Users);
        app.next();
        app.go_to_bottom();
        app.page_down(10);
        assert_eq!(app.selected, 0);
        assert_eq!(app.visible_range(), 0..0);
        assert!(app.selected_route().is_none());
    }
}
