use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, scrollable, text, Column};
use iced::{Alignment, Color, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use super::{ACCENT, MUTED};
use crate::unsplash::Photo;
use crate::Message;

/// Full-screen detail view of the selected photo
pub fn overlay<'a>(
    photo: &'a Photo,
    picture: Option<&'a Handle>,
    avatar: Option<&'a Handle>,
) -> Element<'a, Message> {
    let back = button(text("← Voltar"))
        .on_press(Message::ClosePreview)
        .padding([8, 12])
        .style(button::secondary);

    let picture: Element<'a, Message> = match picture {
        Some(handle) => image(handle.clone())
            .width(Length::FillPortion(2))
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("Carregando imagem...").color(MUTED))
            .center_x(Length::FillPortion(2))
            .center_y(Length::Fill)
            .into(),
    };

    let body = row![picture, details(photo, avatar)]
        .spacing(24)
        .height(Length::Fill);

    container(column![back, body].spacing(16))
        .padding(24)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.95).into()),
            text_color: Some(Color::WHITE),
            ..container::Style::default()
        })
        .into()
}

/// Side panel: title, author, counters, tags and the download button
fn details<'a>(photo: &'a Photo, avatar: Option<&'a Handle>) -> Element<'a, Message> {
    let names = column![
        text(&photo.user.name).size(16),
        button(text(format!("@{}", photo.user.username)).size(14).color(MUTED))
            .on_press(Message::OpenProfile(photo.user.links.html.clone()))
            .padding(0)
            .style(button::text),
    ]
    .spacing(2);

    let mut author = row![].spacing(12).align_y(Alignment::Center);
    if let Some(handle) = avatar {
        author = author.push(image(handle.clone()).width(40).height(40));
    }
    let author = author.push(names);

    let mut panel = Column::new()
        .spacing(20)
        .width(Length::Fill)
        .push(text(photo.title()).size(22))
        .push(author);

    if let Some(description) = photo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        panel = panel.push(text(description).size(14).color(MUTED));
    }

    panel = panel.push(
        row![
            text(format!("♥ {}", photo.likes)).color(ACCENT),
            text(format!("⬇ {}", photo.downloads_label())),
        ]
        .spacing(16)
        .align_y(Alignment::Center),
    );

    panel = panel.push(tags(photo));

    panel = panel.push(
        button(text("⬇ Baixar"))
            .on_press(Message::Download)
            .padding(10)
            .width(Length::Fill),
    );

    scrollable(panel)
        .width(Length::FillPortion(1))
        .height(Length::Fill)
        .into()
}

fn tags(photo: &Photo) -> Element<'_, Message> {
    let titles = photo.tag_titles();
    if titles.is_empty() {
        return text("Sem tags").size(12).color(MUTED).into();
    }

    let chips: Vec<Element<'_, Message>> = titles
        .into_iter()
        .map(|title| {
            container(text(title).size(12))
                .padding([4, 8])
                .style(container::rounded_box)
                .into()
        })
        .collect();

    Wrap::with_elements(chips).spacing(8.0).line_spacing(8.0).into()
}
