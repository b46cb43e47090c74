use std::sync::Arc;

use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

use vitrine_core::content::{Certificate, Contact, Course, ImageResolver, Placement, Training};
use vitrine_core::marquee::{split_items, ScrollDirection, ScrollState, SeenSet, Track};
use vitrine_core::AppConfig;

use crate::image_renderer::ImageRenderer;
use crate::images::ImageCache;
use crate::typewriter::Typewriter;

/// Gap between cards on a track, in cells
pub const CARD_GAP: u16 = 3;

/// Image band height of a placement card, in rows
pub const PLACEMENT_IMAGE_ROWS: u16 = 3;

/// Minimum card width when an image tile is rendered above the label
pub const IMAGE_TILE_COLS: u16 = 12;

/// A certificate rendered as one cell-measured card
#[derive(Debug, Clone)]
pub struct CertCard {
    pub label: String,
    pub image_url: String,
    pub width: u16,
}

impl CertCard {
    pub fn new(cert: &Certificate, resolver: &ImageResolver) -> Self {
        let label = format!("🎓 {}", cert.display_title());
        let width = (label.width() as u16).max(IMAGE_TILE_COLS) + CARD_GAP;
        Self {
            label,
            image_url: resolver.certificate_image(&cert.image),
            width,
        }
    }
}

/// A training offering rendered as one cell-measured card
#[derive(Debug, Clone)]
pub struct TrainingCard {
    pub label: String,
    pub width: u16,
}

impl TrainingCard {
    pub fn new(training: &Training) -> Self {
        let label = format!("◆ {}", training.name);
        let width = label.width() as u16 + CARD_GAP;
        Self { label, width }
    }
}

/// A placement rendered as a card: optional photo band above four text lines
#[derive(Debug, Clone)]
pub struct PlacementCard {
    pub lines: Vec<String>,
    pub image_url: String,
    pub width: u16,
    pub height: u16,
}

impl PlacementCard {
    pub fn new(placement: &Placement, resolver: &ImageResolver, image_rows: u16) -> Self {
        let lines = vec![
            placement.name.clone(),
            placement.role.clone(),
            placement.company.clone(),
            placement.package.clone(),
        ];
        let mut width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        if image_rows > 0 {
            width = width.max(IMAGE_TILE_COLS);
        }
        // One blank gap row below each card
        let height = image_rows + lines.len() as u16 + 1;
        Self {
            lines,
            image_url: resolver.image(&placement.image),
            width: width + CARD_GAP,
            height,
        }
    }

    /// Rows of the photo band above the text lines
    pub fn image_rows(&self) -> u16 {
        self.height - self.lines.len() as u16 - 1
    }
}

/// Sum of card extents along the scroll axis for one non-duplicated copy
fn track_extent<T>(track: &Track<T>, size: impl Fn(&T) -> u16) -> f64 {
    track.items().iter().map(|card| size(card) as f64).sum()
}

/// The certificate wall: two rows fed by the same collection
///
/// Implements the incremental refresh contract: every poll is diffed
/// against the seen-set, only unseen items are appended (split with the
/// same ceiling division), thresholds are refreshed, and the seen-set is
/// replaced with the full current identifier set.
pub struct CertWall {
    pub track_a: Track<CertCard>,
    pub track_b: Track<CertCard>,
    pub state_a: ScrollState,
    pub state_b: ScrollState,
    pub seen: SeenSet,
}

impl CertWall {
    pub fn new(speed: f64) -> Self {
        Self {
            track_a: Track::default(),
            track_b: Track::default(),
            state_a: ScrollState::new(speed, ScrollDirection::Forward),
            state_b: ScrollState::new(speed, ScrollDirection::Forward),
            seen: SeenSet::new(),
        }
    }

    /// Apply a poll result; returns the number of appended items
    pub fn apply_poll(&mut self, items: &[Certificate], resolver: &ImageResolver) -> usize {
        let new_items = self.seen.filter_new(items, |index, cert| cert.identity(index));
        let appended = new_items.len();

        if appended > 0 {
            let cards: Vec<CertCard> = new_items
                .into_iter()
                .map(|cert| CertCard::new(cert, resolver))
                .collect();
            let (first, second) = split_items(cards);
            self.track_a.append(first);
            self.track_b.append(second);
            self.update_thresholds();
        }

        self.seen
            .replace(items.iter().enumerate().map(|(i, c)| c.identity(i)));

        appended
    }

    fn update_thresholds(&mut self) {
        self.state_a
            .set_threshold(track_extent(&self.track_a, |c| c.width));
        self.state_b
            .set_threshold(track_extent(&self.track_b, |c| c.width));
    }

    pub fn tick(&mut self) {
        self.state_a.tick();
        self.state_b.tick();
    }

    pub fn set_pointer_pause(&mut self, paused: bool) {
        self.state_a.set_pointer_pause(paused);
        self.state_b.set_pointer_pause(paused);
    }

    pub fn toggle_pause(&mut self) {
        self.state_a.toggle_pause();
        self.state_b.toggle_pause();
    }

    pub fn is_paused(&self) -> bool {
        self.state_a.is_paused()
    }
}

/// The training strip: one continuously sliding row
pub struct TrainingStrip {
    pub track: Track<TrainingCard>,
    pub state: ScrollState,
}

impl TrainingStrip {
    pub fn new(speed: f64) -> Self {
        Self {
            track: Track::default(),
            state: ScrollState::new(speed, ScrollDirection::Forward),
        }
    }

    pub fn populate(&mut self, trainings: &[Training]) {
        self.track = Track::new(trainings.iter().map(TrainingCard::new).collect());
        self.state
            .set_threshold(track_extent(&self.track, |c| c.width));
    }
}

/// Scroll axis of the placement board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    /// Wide terminals: two side-by-side columns moving up/down
    Vertical,
    /// Narrow terminals: two stacked rows moving left/right
    Horizontal,
}

/// The placement board: two counter-flowing tracks
pub struct PlacementBoard {
    pub track_down: Track<PlacementCard>,
    pub track_up: Track<PlacementCard>,
    pub state_down: ScrollState,
    pub state_up: ScrollState,
    pub axis: ScrollAxis,
}

impl PlacementBoard {
    pub fn new(speed: f64) -> Self {
        Self {
            track_down: Track::default(),
            track_up: Track::default(),
            state_down: ScrollState::new(speed, ScrollDirection::Forward),
            state_up: ScrollState::new(speed, ScrollDirection::Reverse),
            axis: ScrollAxis::Vertical,
        }
    }

    /// Sort by name, split across the two tracks, measure extents
    pub fn populate(
        &mut self,
        mut placements: Vec<Placement>,
        resolver: &ImageResolver,
        image_rows: u16,
    ) {
        placements.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let cards: Vec<PlacementCard> = placements
            .iter()
            .map(|p| PlacementCard::new(p, resolver, image_rows))
            .collect();
        let (down, up) = split_items(cards);
        self.track_down = Track::new(down);
        self.track_up = Track::new(up);

        self.update_thresholds();
        self.state_down.reset();
        self.state_up.reset();
    }

    /// Switch scroll axis; extents differ per axis so thresholds are
    /// remeasured and both tracks restart from their boundary
    pub fn set_axis(&mut self, axis: ScrollAxis) {
        if self.axis == axis {
            return;
        }
        self.axis = axis;
        self.update_thresholds();
        self.state_down.reset();
        self.state_up.reset();
    }

    fn update_thresholds(&mut self) {
        let (down, up) = match self.axis {
            ScrollAxis::Vertical => (
                track_extent(&self.track_down, |c| c.height),
                track_extent(&self.track_up, |c| c.height),
            ),
            ScrollAxis::Horizontal => (
                track_extent(&self.track_down, |c| c.width),
                track_extent(&self.track_up, |c| c.width),
            ),
        };
        self.state_down.set_threshold(down);
        self.state_up.set_threshold(up);
    }

    pub fn tick(&mut self) {
        self.state_down.tick();
        self.state_up.tick();
    }
}

/// Focusable panels, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    CertWall,
    TrainingStrip,
    PlacementDown,
    PlacementUp,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::CertWall => Panel::TrainingStrip,
            Panel::TrainingStrip => Panel::PlacementDown,
            Panel::PlacementDown => Panel::PlacementUp,
            Panel::PlacementUp => Panel::CertWall,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Panel::CertWall => Panel::PlacementUp,
            Panel::TrainingStrip => Panel::CertWall,
            Panel::PlacementDown => Panel::TrainingStrip,
            Panel::PlacementUp => Panel::PlacementDown,
        }
    }
}

/// Screen rectangles of the panels, refreshed on every draw for mouse
/// hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelAreas {
    pub cert: Rect,
    pub training: Rect,
    pub down: Rect,
    pub up: Rect,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Certificate wall (two tracks + seen-set)
    pub cert_wall: CertWall,
    /// Training strip (single sliding track)
    pub training_strip: TrainingStrip,
    /// Placement board (counter-flowing tracks)
    pub placement_board: PlacementBoard,
    /// Typewriter banner tagline
    pub banner: Typewriter,
    /// Upcoming batch (last course from the backend)
    pub upcoming: Option<Course>,
    /// Footer contact (last contact from the backend)
    pub contact: Option<Contact>,
    /// Currently focused panel
    pub focus: Panel,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Panel rectangles from the last draw
    pub areas: PanelAreas,
    /// Resolves backend image paths to absolute URLs
    pub resolver: ImageResolver,
    /// Downloaded card images
    pub images: ImageCache,
    /// Terminal image backend
    pub image_renderer: ImageRenderer,
    /// Kitty keys displayed during the current draw, pruned after it
    pub frame_images: Vec<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let banner = Typewriter::new(config.ui.tagline.clone(), config.ui.typing_interval_ms);
        Self {
            cert_wall: CertWall::new(config.marquee.certificates),
            training_strip: TrainingStrip::new(config.marquee.trainings),
            placement_board: PlacementBoard::new(config.marquee.placements),
            banner,
            upcoming: None,
            contact: None,
            focus: Panel::CertWall,
            status_message: None,
            should_quit: false,
            areas: PanelAreas::default(),
            resolver: ImageResolver::new(&config.api),
            images: ImageCache::new(),
            image_renderer: ImageRenderer::new(config.ui.show_images),
            frame_images: Vec::new(),
            config,
        }
    }

    /// Advance one animation frame: every track plus the typewriter
    pub fn on_tick(&mut self) {
        self.banner.tick();
        self.cert_wall.tick();
        self.training_strip.state.tick();
        self.placement_board.tick();
    }

    /// Apply a certificate poll (initial load and background refresh alike)
    pub fn apply_certificates(&mut self, items: &[Certificate]) {
        let appended = self.cert_wall.apply_poll(items, &self.resolver);
        if appended > 0 {
            tracing::debug!("Appended {} new certificates", appended);
            self.set_status(format!("{} new certificate(s)", appended));
        }
    }

    pub fn set_trainings(&mut self, trainings: &[Training]) {
        self.training_strip.populate(trainings);
    }

    pub fn set_placements(&mut self, placements: Vec<Placement>) {
        let image_rows = if self.image_renderer.is_active() {
            PLACEMENT_IMAGE_ROWS
        } else {
            0
        };
        self.placement_board
            .populate(placements, &self.resolver, image_rows);
    }

    /// Card image URLs not yet requested, deduplicated
    ///
    /// The caller marks each one loading and spawns its download.
    pub fn pending_image_urls(&self) -> Vec<String> {
        if !self.image_renderer.is_active() {
            return Vec::new();
        }

        let cert_urls = self
            .cert_wall
            .track_a
            .items()
            .iter()
            .chain(self.cert_wall.track_b.items())
            .map(|c| &c.image_url);
        let placement_urls = self
            .placement_board
            .track_down
            .items()
            .iter()
            .chain(self.placement_board.track_up.items())
            .map(|c| &c.image_url);

        let mut seen = std::collections::HashSet::new();
        cert_urls
            .chain(placement_urls)
            .filter(|url| !self.images.is_known(url) && seen.insert(url.as_str()))
            .cloned()
            .collect()
    }

    /// Pick the placement scroll axis from the terminal width
    pub fn update_axis(&mut self, terminal_width: u16) {
        let axis = if terminal_width >= self.config.ui.wide_cutoff_cols {
            ScrollAxis::Vertical
        } else {
            ScrollAxis::Horizontal
        };
        self.placement_board.set_axis(axis);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Flip the toggle pause source of the focused panel
    pub fn toggle_focused_pause(&mut self) {
        match self.focus {
            Panel::CertWall => self.cert_wall.toggle_pause(),
            Panel::TrainingStrip => self.training_strip.state.toggle_pause(),
            Panel::PlacementDown => self.placement_board.state_down.toggle_pause(),
            Panel::PlacementUp => self.placement_board.state_up.toggle_pause(),
        }
    }

    /// Pointer moved: the hovered panel gains the pointer pause source,
    /// every other panel loses it
    pub fn on_mouse_moved(&mut self, column: u16, row: u16) {
        let pos = Position::new(column, row);
        self.cert_wall.set_pointer_pause(self.areas.cert.contains(pos));
        self.training_strip
            .state
            .set_pointer_pause(self.areas.training.contains(pos));
        self.placement_board
            .state_down
            .set_pointer_pause(self.areas.down.contains(pos));
        self.placement_board
            .state_up
            .set_pointer_pause(self.areas.up.contains(pos));
    }

    /// Click: focus the panel under the pointer and flip its toggle pause
    pub fn on_mouse_click(&mut self, column: u16, row: u16) {
        let pos = Position::new(column, row);
        if self.areas.cert.contains(pos) {
            self.focus = Panel::CertWall;
        } else if self.areas.training.contains(pos) {
            self.focus = Panel::TrainingStrip;
        } else if self.areas.down.contains(pos) {
            self.focus = Panel::PlacementDown;
        } else if self.areas.up.contains(pos) {
            self.focus = Panel::PlacementUp;
        } else {
            return;
        }
        self.toggle_focused_pause();
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::config::ApiConfig;

    fn resolver() -> ImageResolver {
        let mut api = ApiConfig::default();
        api.base_url = "https://backend.example.com".to_string();
        ImageResolver::new(&api)
    }

    fn cert(id: &str) -> Certificate {
        Certificate {
            id: Some(id.to_string()),
            title: Some(format!("Cert {}", id)),
            image: format!("/uploads/{}.png", id),
        }
    }

    fn placement(name: &str) -> Placement {
        Placement {
            name: name.to_string(),
            role: "DevOps Engineer".to_string(),
            company: "Acme".to_string(),
            package: "12 LPA".to_string(),
            image: "/p.png".to_string(),
        }
    }

    #[test]
    fn test_cert_poll_splits_with_ceiling_division() {
        let mut wall = CertWall::new(1.0);
        let items = vec![cert("1"), cert("2"), cert("3")];

        assert_eq!(wall.apply_poll(&items, &resolver()), 3);
        assert_eq!(wall.track_a.len(), 2);
        assert_eq!(wall.track_b.len(), 1);
        assert_eq!(wall.track_a.rendered_len(), 4);
        assert_eq!(wall.track_b.rendered_len(), 2);
        assert!(wall.state_a.is_running());
    }

    #[test]
    fn test_identical_poll_appends_nothing() {
        let mut wall = CertWall::new(1.0);
        let items = vec![cert("1"), cert("2"), cert("3")];
        wall.apply_poll(&items, &resolver());

        assert_eq!(wall.apply_poll(&items, &resolver()), 0);
        assert_eq!(wall.track_a.len(), 2);
        assert_eq!(wall.track_b.len(), 1);
    }

    #[test]
    fn test_second_poll_appends_only_new() {
        let mut wall = CertWall::new(1.0);
        wall.apply_poll(&[cert("1"), cert("2"), cert("3")], &resolver());

        let second = vec![cert("1"), cert("2"), cert("3"), cert("4")];
        assert_eq!(wall.apply_poll(&second, &resolver()), 1);

        // Existing tracks grew, nothing was rebuilt
        assert_eq!(wall.track_a.len() + wall.track_b.len(), 4);
    }

    #[test]
    fn test_empty_poll_leaves_wall_stopped() {
        let mut wall = CertWall::new(1.0);
        wall.apply_poll(&[], &resolver());
        assert!(!wall.state_a.is_running());

        for _ in 0..10 {
            wall.tick();
        }
        assert_eq!(wall.state_a.offset(), 0.0);
    }

    #[test]
    fn test_placements_sorted_by_name_before_split() {
        let mut board = PlacementBoard::new(1.0);
        board.populate(
            vec![placement("zara"), placement("Amit"), placement("maya")],
            &resolver(),
            0,
        );

        let first_names: Vec<&str> = board
            .track_down
            .items()
            .iter()
            .map(|c| c.lines[0].as_str())
            .collect();
        assert_eq!(first_names, vec!["Amit", "maya"]);
        assert_eq!(board.track_up.items()[0].lines[0], "zara");
    }

    #[test]
    fn test_axis_switch_restarts_tracks() {
        let mut board = PlacementBoard::new(1.0);
        board.populate(vec![placement("a"), placement("b")], &resolver(), 0);

        for _ in 0..3 {
            board.tick();
        }
        assert!(board.state_down.offset() > 0.0);

        board.set_axis(ScrollAxis::Horizontal);
        assert_eq!(board.state_down.offset(), 0.0);
        assert_eq!(board.state_up.offset(), board.state_up.threshold());
    }

    #[test]
    fn test_counter_flow_directions() {
        let board = PlacementBoard::new(1.0);
        assert_eq!(board.state_down.direction(), ScrollDirection::Forward);
        assert_eq!(board.state_up.direction(), ScrollDirection::Reverse);
    }

    #[test]
    fn test_cert_card_resolves_bare_filename_under_uploads() {
        let item = Certificate {
            id: Some("1".to_string()),
            title: Some("DevOps".to_string()),
            image: "cert-1.png".to_string(),
        };
        let card = CertCard::new(&item, &resolver());
        assert_eq!(
            card.image_url,
            "https://backend.example.com/uploads/cert-1.png"
        );
    }

    #[test]
    fn test_placement_card_height_includes_photo_band() {
        let with_photo = PlacementCard::new(&placement("a"), &resolver(), PLACEMENT_IMAGE_ROWS);
        assert_eq!(with_photo.height, PLACEMENT_IMAGE_ROWS + 5);
        assert_eq!(with_photo.image_rows(), PLACEMENT_IMAGE_ROWS);

        let text_only = PlacementCard::new(&placement("a"), &resolver(), 0);
        assert_eq!(text_only.height, 5);
        assert_eq!(text_only.image_rows(), 0);
    }

    #[test]
    fn test_pending_image_urls_dedupes_and_skips_known() {
        let mut wall = CertWall::new(1.0);
        let mut items = vec![cert("1"), cert("2")];
        // Two cards sharing one image
        items[1].image = items[0].image.clone();
        wall.apply_poll(&items, &resolver());

        let mut app = App::new(Arc::new(AppConfig::default()));
        app.cert_wall = wall;

        let pending = app.pending_image_urls();
        if app.image_renderer.is_active() {
            assert_eq!(pending.len(), 1);

            app.images.start_loading(pending[0].clone());
            assert!(app.pending_image_urls().is_empty());
        } else {
            assert!(pending.is_empty());
        }
    }
}
