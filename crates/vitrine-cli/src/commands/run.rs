use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::{mpsc, watch};

use vitrine_core::{
    content::ContentFetcher,
    scheduler::{RefreshEvent, RefreshService},
    AppConfig,
};
use vitrine_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    images::ImageLoadResult,
    input::{handle_key_event, Action},
    widgets::{
        BatchBannerWidget, CertWallWidget, PlacementBoardWidget, StatusBarWidget,
        TrainingStripWidget,
    },
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let fetcher = Arc::new(ContentFetcher::new(&config)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Vitrine")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state and load everything once; each failure is logged and
    // leaves the affected widget empty rather than aborting startup
    let mut app = App::new(config.clone());
    load_initial_content(&mut app, &fetcher).await;

    // Card images download in the background and land in the cache as they
    // finish
    let (img_tx, mut img_rx) = mpsc::unbounded_channel::<ImageLoadResult>();
    spawn_image_loads(&mut app, &fetcher, &img_tx);

    // Background certificate refresh, tied to the UI lifetime through the
    // shutdown channel
    let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel::<RefreshEvent>();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let service = RefreshService::new(fetcher.clone(), config.clone(), refresh_tx.clone());
    let service_handle = tokio::spawn(service.run(shutdown_rx));

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    let result = main_loop(
        &mut terminal,
        &mut app,
        &event_handler,
        &mut refresh_rx,
        &mut img_rx,
        &img_tx,
        &fetcher,
        &refresh_tx,
    );

    // Stop the refresh service before tearing the terminal down
    let _ = shutdown_tx.send(true);
    let _ = service_handle.await;
    app.image_renderer.clear_all();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn load_initial_content(app: &mut App, fetcher: &ContentFetcher) {
    let (certificates, trainings, placements, course, contact) = tokio::join!(
        fetcher.certificates(),
        fetcher.trainings(),
        fetcher.placements(),
        fetcher.latest_course(),
        fetcher.latest_contact(),
    );

    match certificates {
        Ok(items) => app.apply_certificates(&items),
        Err(e) => tracing::error!("Failed to load certificates: {}", e),
    }
    match trainings {
        Ok(items) => app.set_trainings(&items),
        Err(e) => tracing::error!("Failed to load trainings: {}", e),
    }
    match placements {
        Ok(items) => app.set_placements(items),
        Err(e) => tracing::error!("Failed to load placements: {}", e),
    }
    match course {
        Ok(course) => app.upcoming = course,
        Err(e) => tracing::error!("Failed to load upcoming batch: {}", e),
    }
    match contact {
        Ok(contact) => app.contact = contact,
        Err(e) => tracing::error!("Failed to load footer contact: {}", e),
    }
}

#[allow(clippy::too_many_arguments)]
fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    refresh_rx: &mut mpsc::UnboundedReceiver<RefreshEvent>,
    img_rx: &mut mpsc::UnboundedReceiver<ImageLoadResult>,
    img_tx: &mpsc::UnboundedSender<ImageLoadResult>,
    fetcher: &Arc<ContentFetcher>,
    refresh_tx: &mpsc::UnboundedSender<RefreshEvent>,
) -> Result<()> {
    loop {
        // Process completed polls (non-blocking)
        while let Ok(event) = refresh_rx.try_recv() {
            match event {
                RefreshEvent::Certificates { items } => {
                    app.apply_certificates(&items);
                    // Replaced cards may carry images not yet requested
                    spawn_image_loads(app, fetcher, img_tx);
                }
                RefreshEvent::Error { message } => {
                    app.set_status(format!("Refresh failed: {}", message));
                }
            }
        }

        // Process finished image downloads
        while let Ok(result) = img_rx.try_recv() {
            match result {
                ImageLoadResult::Success { url, image } => app.images.set_loaded(url, image),
                ImageLoadResult::Failure { url, error } => {
                    tracing::warn!("Image download failed for {}: {}", url, error);
                    app.images.set_failed(url);
                }
            }
        }

        // The wall needs room for image bands only when a backend is active
        let cert_wall_height = if app.image_renderer.is_active() { 10 } else { 4 };

        // Draw UI
        app.frame_images.clear();
        terminal.draw(|frame| {
            let size = frame.area();
            app.update_axis(size.width);

            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2),                // Banner
                    Constraint::Length(cert_wall_height), // Certificate wall
                    Constraint::Length(3),                // Training strip
                    Constraint::Min(8),                   // Placement board
                    Constraint::Length(1),                // Status bar
                ])
                .split(size);

            BatchBannerWidget::render(frame, main_layout[0], app);
            CertWallWidget::render(frame, main_layout[1], app);
            TrainingStripWidget::render(frame, main_layout[2], app);
            PlacementBoardWidget::render(frame, main_layout[3], app);
            StatusBarWidget::render(frame, main_layout[4], app);
        })?;
        let active_keys = std::mem::take(&mut app.frame_images);
        app.image_renderer.finish_frame(&active_keys);

        // Handle events
        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => match handle_key_event(key) {
                    Action::Quit => app.should_quit = true,
                    Action::FocusNext => app.focus_next(),
                    Action::FocusPrev => app.focus_prev(),
                    Action::TogglePause => app.toggle_focused_pause(),
                    Action::Refresh => {
                        app.set_status("Refreshing certificates...");
                        spawn_refresh(fetcher.clone(), refresh_tx.clone());
                    }
                    Action::None => {}
                },
                AppEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved => app.on_mouse_moved(mouse.column, mouse.row),
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.on_mouse_click(mouse.column, mouse.row)
                    }
                    _ => {}
                },
                // Layout and axis are recomputed on the next draw
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => app.on_tick(),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Start a download task for every card image not yet requested
fn spawn_image_loads(
    app: &mut App,
    fetcher: &Arc<ContentFetcher>,
    tx: &mpsc::UnboundedSender<ImageLoadResult>,
) {
    for url in app.pending_image_urls() {
        app.images.start_loading(url.clone());

        let fetcher = fetcher.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = match fetcher.image_bytes(&url).await {
                Ok(bytes) => match image::load_from_memory(&bytes) {
                    Ok(image) => ImageLoadResult::Success { url, image },
                    Err(e) => ImageLoadResult::Failure {
                        url,
                        error: e.to_string(),
                    },
                },
                Err(e) => ImageLoadResult::Failure {
                    url,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(result);
        });
    }
}

/// Manual refresh: one certificate poll pushed through the same channel as
/// the background service
fn spawn_refresh(fetcher: Arc<ContentFetcher>, tx: mpsc::UnboundedSender<RefreshEvent>) {
    tokio::spawn(async move {
        let event = match fetcher.certificates().await {
            Ok(items) => RefreshEvent::Certificates { items },
            Err(e) => RefreshEvent::Error {
                message: e.to_string(),
            },
        };
        let _ = tx.send(event);
    });
}
