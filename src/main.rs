use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{time, window, Alignment, ContentFit, Element, Length, Size, Subscription, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use responsive_gallery::config::Config;
use responsive_gallery::logging;
use responsive_gallery::media::loader::{self, LoadedImage};
use responsive_gallery::media::variants::{self, VariantReport};
use responsive_gallery::resolve::Loading;
use responsive_gallery::state::content::{self, ContentManifest};
use responsive_gallery::state::data::{FailureStep, GalleryAction, GalleryItem, LoadStatus};
use responsive_gallery::ui::skeleton::Skeleton;
use responsive_gallery::ui::tile;
use responsive_gallery::VariantUnavailable;

/// Skeleton sweep speed per tick
const SKELETON_STEP: f32 = 0.04;

/// Main application state
struct Gallery {
    config: Config,
    /// Folder that logical paths are resolved against
    asset_root: Option<PathBuf>,
    items: Vec<GalleryItem>,
    /// Current window width, drives variant selection
    viewport_width: f32,
    skeleton_phase: f32,
    /// Image open in the viewer
    selected: Option<usize>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Open Folder"
    OpenFolder,
    FolderScanned(Result<ContentManifest, String>),
    /// A candidate fetch finished for the tile with this id
    ImageLoaded(usize, Result<LoadedImage, VariantUnavailable>),
    Gallery(GalleryAction),
    CloseViewer,
    /// User clicked "Generate Variants"
    GenerateVariants,
    VariantsGenerated(Result<VariantReport, String>),
    WindowResized(Size),
    Tick,
}

impl Gallery {
    fn new() -> (Self, Task<Message>) {
        let (config, status) = match Config::load_or_default() {
            Ok(config) => (config, "Open a folder of images to begin.".to_string()),
            Err(e) => {
                error!(error = %e, "config rejected, using defaults");
                (Config::default(), format!("Config error ({e}); using defaults."))
            }
        };

        (
            Gallery {
                config,
                asset_root: None,
                items: Vec::new(),
                viewport_width: 1024.0,
                skeleton_phase: 0.0,
                selected: None,
                status,
            },
            Task::none(),
        )
    }

    /// Fetch one candidate for a tile in the background
    fn load(&self, id: usize, path: String) -> Task<Message> {
        let Some(root) = self.asset_root.clone() else {
            return Task::none();
        };
        Task::perform(loader::load_candidate(root, path), move |result| {
            Message::ImageLoaded(id, result)
        })
    }

    fn scan(&self) -> Task<Message> {
        let Some(root) = self.asset_root.clone() else {
            return Task::none();
        };
        Task::perform(
            content::scan_folder_async(root, self.config.variants.clone()),
            Message::FolderScanned,
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolder => {
                let Some(folder) = FileDialog::new()
                    .set_title("Select Folder with Images")
                    .pick_folder()
                else {
                    return Task::none();
                };

                self.status = format!("Scanning {}...", folder.display());
                self.asset_root = Some(folder);
                self.selected = None;
                self.scan()
            }
            Message::FolderScanned(Ok(manifest)) => {
                self.items = manifest
                    .entries
                    .iter()
                    .enumerate()
                    .filter_map(|(id, entry)| match GalleryItem::from_entry(id, entry, &self.config) {
                        Ok(item) => Some(item),
                        Err(e) => {
                            warn!(slot = %entry.slot, error = %e, "skipping content entry");
                            None
                        }
                    })
                    .collect();

                self.status = format!("{} images.", self.items.len());
                info!(images = self.items.len(), "gallery ready");

                // Priority images are fetched first
                let mut order: Vec<&GalleryItem> = self.items.iter().collect();
                order.sort_by_key(|item| item.resolver.render().loading != Loading::Eager);

                let vw = self.viewport_width;
                Task::batch(
                    order
                        .into_iter()
                        .map(|item| self.load(item.id, item.candidate(vw)))
                        .collect::<Vec<_>>(),
                )
            }
            Message::FolderScanned(Err(e)) => {
                error!(error = %e, "folder scan failed");
                self.status = format!("Scan failed: {e}");
                Task::none()
            }
            Message::ImageLoaded(id, result) => {
                let vw = self.viewport_width;
                let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
                    return Task::none();
                };

                match result {
                    Ok(image) => {
                        if !item.on_loaded(image) {
                            debug!(id, "dropped stale image");
                        }
                        Task::none()
                    }
                    Err(unavailable) => match item.on_failed(&unavailable, vw) {
                        FailureStep::Retry(path) => self.load(id, path),
                        FailureStep::GiveUp => {
                            warn!(id, path = %unavailable.path, reason = %unavailable.reason, "no image to show");
                            Task::none()
                        }
                        FailureStep::Stale => Task::none(),
                    },
                }
            }
            Message::Gallery(GalleryAction::Open(id)) => {
                self.selected = Some(id);
                Task::none()
            }
            Message::CloseViewer => {
                self.selected = None;
                Task::none()
            }
            Message::GenerateVariants => {
                let Some(root) = self.asset_root.clone() else {
                    return Task::none();
                };
                self.status = "Generating variants...".to_string();
                Task::perform(
                    variants::generate_folder_async(root, self.config.variants.clone()),
                    Message::VariantsGenerated,
                )
            }
            Message::VariantsGenerated(Ok(report)) => {
                self.status = format!(
                    "Variants: {} generated, {} up to date, {} failed.",
                    report.generated, report.skipped, report.failed
                );
                // Fresh tiles, so every image starts from its variants again
                self.scan()
            }
            Message::VariantsGenerated(Err(e)) => {
                error!(error = %e, "variant generation failed");
                self.status = format!("Variant generation failed: {e}");
                Task::none()
            }
            Message::WindowResized(size) => {
                self.viewport_width = size.width;
                Task::none()
            }
            Message::Tick => {
                self.skeleton_phase = Skeleton::advance(self.skeleton_phase, SKELETON_STEP);
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let resize = window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        if self.items.iter().any(GalleryItem::is_pending) {
            Subscription::batch([
                resize,
                time::every(Duration::from_millis(50)).map(|_| Message::Tick),
            ])
        } else {
            resize
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text("Responsive Gallery").size(28),
            button("Open Folder")
                .on_press(Message::OpenFolder)
                .padding(10),
            button("Generate Variants")
                .on_press_maybe(self.asset_root.as_ref().map(|_| Message::GenerateVariants))
                .padding(10),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let body: Element<Message> = match self.selected.and_then(|id| self.items.iter().find(|i| i.id == id)) {
            Some(item) => self.viewer(item),
            None => {
                let tiles = self
                    .items
                    .iter()
                    .map(|item| tile::tile(item, self.skeleton_phase).map(Message::Gallery))
                    .collect();
                scrollable(Wrap::with_elements(tiles).spacing(12.0).line_spacing(12.0))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            }
        };

        container(column![header, body].spacing(20))
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Single image, with what the resolver is offering for it
    fn viewer<'a>(&'a self, item: &'a GalleryItem) -> Element<'a, Message> {
        let rendition = item.resolver.render();

        let picture: Element<Message> = match &item.status {
            LoadStatus::Loaded { handle, .. } => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .into(),
            LoadStatus::Pending => text("Loading...").into(),
            LoadStatus::Failed => text("Image unavailable").size(20).into(),
        };

        let shown = match &item.status {
            LoadStatus::Loaded { path, width, height, .. } => format!("{path} ({width}x{height})"),
            _ => "-".to_string(),
        };

        let details: Column<Message> = column![
            text(item.resolver.description()).size(20),
            text(format!("Showing: {shown}")).size(14),
            text(format!("State: {:?}", rendition.state)).size(14),
            text(format!("Candidates: {}", rendition.srcset())).size(14),
            text(format!("Sizes: {}", rendition.sizes)).size(14),
            button("Back to gallery").on_press(Message::CloseViewer).padding(8),
        ]
        .spacing(8);

        column![container(picture).height(Length::FillPortion(4)), details]
            .spacing(16)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    logging::init();

    iced::application(
        "Responsive Gallery",
        Gallery::update,
        Gallery::view,
    )
    .subscription(Gallery::subscription)
    .theme(Gallery::theme)
    .centered()
    .run_with(Gallery::new)
}
