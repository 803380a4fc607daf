//! Search header, state panels, results grid and footer

use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, horizontal_space, image, mouse_area, row, scrollable, text,
    text_input,
    Column, Space,
};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use super::{ACCENT, MUTED};
use crate::state::gallery::{Gallery, ViewState};
use crate::unsplash::Photo;
use crate::Message;

/// Width of one grid tile
const TILE_WIDTH: f32 = 260.0;
/// Height of the thumbnail inside a tile
const TILE_IMAGE_HEIGHT: f32 = 220.0;

pub fn search_input_id() -> text_input::Id {
    text_input::Id::new("search-input")
}

/// The page scrollable holding the results
pub fn results_scroll_id() -> scrollable::Id {
    scrollable::Id::new("results")
}

/// Title plus the search box with its clear and submit buttons
pub fn header<'a>(query: &'a str) -> Element<'a, Message> {
    let title = row![
        text("Search").size(32).color(ACCENT),
        text("Shots").size(32),
    ];

    let input = text_input("Explore paisagens, retratos, abstratos...", query)
        .id(search_input_id())
        .on_input(Message::QueryChanged)
        .on_submit(Message::Submit)
        .padding(12)
        .size(16)
        .width(Length::Fill);

    let mut search_row = row![input].spacing(8).align_y(Alignment::Center);

    // The clear button only appears when there is something to clear
    if !query.is_empty() {
        search_row = search_row.push(
            button(text("✕"))
                .on_press(Message::Clear)
                .padding([8, 12])
                .style(button::text),
        );
    }

    search_row = search_row.push(
        button(text("Buscar"))
            .on_press(Message::Submit)
            .padding([8, 16]),
    );

    container(
        column![title, container(search_row).max_width(600.0)]
            .spacing(16)
            .align_x(Alignment::Center),
    )
    .padding(24)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .into()
}

/// Everything between header and footer, driven by the view state
pub fn content(gallery: &Gallery) -> Element<'_, Message> {
    let mut body = Column::new().spacing(24).width(Length::Fill);

    if let Some(message) = gallery.error() {
        body = body.push(error_banner(message));
    }

    body = match gallery.view_state() {
        ViewState::Loading => body.push(loading()),
        ViewState::Idle => body.push(welcome()),
        ViewState::Populated(photos) => body.push(results(gallery, photos)),
        ViewState::Error(_) => body,
    };

    container(body).padding([16, 32]).width(Length::Fill).into()
}

fn error_banner(message: &str) -> Element<'_, Message> {
    container(text(message))
        .padding(16)
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Color::from_rgb8(0x45, 0x12, 0x12).into()),
            text_color: Some(Color::from_rgb8(0xFC, 0xA5, 0xA5)),
            border: Border {
                color: ACCENT,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn loading<'a>() -> Element<'a, Message> {
    container(text("Carregando imagens...").size(18).color(MUTED))
        .padding(64)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

fn welcome<'a>() -> Element<'a, Message> {
    container(
        column![
            text("Descubra Imagens Incríveis").size(36),
            text("Pesquise por qualquer tema e encontre fotos de alta qualidade para seus projetos.")
                .size(16)
                .color(MUTED),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(96)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .into()
}

/// Query header, result counter and the grid
fn results<'a>(gallery: &'a Gallery, photos: &'a [Photo]) -> Element<'a, Message> {
    let summary = row![
        text(format!("\"{}\"", gallery.query())).size(24),
        horizontal_space(),
        text(gallery.results_label()).size(14).color(MUTED),
    ]
    .align_y(Alignment::Center);

    let tiles: Vec<Element<'a, Message>> = photos
        .iter()
        .enumerate()
        .map(|(index, photo)| tile(index, photo, gallery.thumbnail(&photo.id)))
        .collect();

    column![
        summary,
        Wrap::with_elements(tiles).spacing(16.0).line_spacing(16.0),
    ]
    .spacing(24)
    .into()
}

/// One clickable grid cell
fn tile<'a>(index: usize, photo: &'a Photo, thumbnail: Option<&'a Handle>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(TILE_IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fixed(TILE_IMAGE_HEIGHT))
            .style(container::rounded_box)
            .into(),
    };

    let caption = column![
        text(photo.title()).size(14),
        text(format!("👤 {}", photo.user.name)).size(12).color(MUTED),
    ]
    .spacing(4);

    mouse_area(
        container(column![picture, caption].spacing(8))
            .width(Length::Fixed(TILE_WIDTH))
            .padding(8)
            .style(container::rounded_box),
    )
    .on_press(Message::Select(index))
    .into()
}

pub fn footer<'a>(year: i32) -> Element<'a, Message> {
    container(
        text(format!("© {} SearchShots. Powered by Unsplash.", year))
            .size(12)
            .color(MUTED),
    )
    .padding(24)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .into()
}
