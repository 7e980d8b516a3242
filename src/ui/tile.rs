/// Gallery tiles
///
/// A tile shows the skeleton while its image loads, the image once loaded,
/// and the description on a plain block if every candidate failed.
use iced::widget::{canvas, column, container, mouse_area, text};
use iced::{ContentFit, Element, Length, Theme};

use super::skeleton::Skeleton;
use crate::state::data::{GalleryAction, GalleryItem, LoadStatus};

pub const TILE_WIDTH: f32 = 240.0;
pub const TILE_HEIGHT: f32 = 180.0;

/// Container style for a visual class
pub fn class_style(class: Option<&str>) -> fn(&Theme) -> container::Style {
    match class {
        Some("rounded") => container::rounded_box,
        Some("bordered") => container::bordered_box,
        _ => container::transparent,
    }
}

pub fn tile(item: &GalleryItem, skeleton_phase: f32) -> Element<'_, GalleryAction> {
    let description = item.resolver.description();

    let picture: Element<'_, GalleryAction> = match &item.status {
        LoadStatus::Pending => canvas(Skeleton { phase: skeleton_phase })
            .width(Length::Fixed(TILE_WIDTH))
            .height(Length::Fixed(TILE_HEIGHT))
            .into(),
        LoadStatus::Loaded { handle, .. } => iced::widget::image(handle.clone())
            .width(Length::Fixed(TILE_WIDTH))
            .height(Length::Fixed(TILE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        LoadStatus::Failed => container(text(description).size(14))
            .padding(12)
            .center_x(Length::Fixed(TILE_WIDTH))
            .center_y(Length::Fixed(TILE_HEIGHT))
            .style(container::bordered_box)
            .into(),
    };

    let framed = container(column![picture, text(description).size(13)].spacing(6).width(Length::Fixed(TILE_WIDTH)))
        .padding(6)
        .style(class_style(item.resolver.hints().class.as_deref()));

    match item.resolver.hints().on_press {
        Some(action) => mouse_area(framed).on_press(action).into(),
        None => framed.into(),
    }
}
