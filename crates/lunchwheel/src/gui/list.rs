use crate::gui::app::{AppModel, AppMsg};
use gtk::prelude::*;
use gtk4 as gtk;
use placepick::{Restaurant, Selection};
use relm4::ComponentSender;

pub const PLACEHOLDER: &str = "Search to see nearby restaurants";

fn row_markup(restaurant: &Restaurant) -> String {
    format!(
        "<b>{}</b> - Rating: <span foreground=\"#e6a100\">{} ★</span>",
        glib::markup_escape_text(restaurant.name.as_str()),
        glib::markup_escape_text(&restaurant.rating_label()),
    )
}

fn build_row(restaurant: &Restaurant, sender: &ComponentSender<AppModel>) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    row.add_css_class("restaurant-row");
    if restaurant.selected {
        row.add_css_class("highlighted");
    }

    let check = gtk::CheckButton::new();
    check.set_active(restaurant.selected);
    check.set_valign(gtk::Align::Center);
    let id = restaurant.id;
    let sender = sender.clone();
    check.connect_toggled(move |button| {
        sender.input(AppMsg::Toggle(id, button.is_active()));
    });

    let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
    let title = gtk::Label::new(None);
    title.set_markup(&row_markup(restaurant));
    title.set_xalign(0.0);
    title.set_wrap(true);
    let address = gtk::Label::new(Some(&restaurant.address));
    address.set_xalign(0.0);
    address.set_wrap(true);
    address.add_css_class("dim-label");
    text.append(&title);
    text.append(&address);

    row.append(&check);
    row.append(&text);
    row
}

/// Rebuilds every row. Checkboxes always reflect `selection`, so a rejected
/// toggle snaps back on the next render.
pub fn render(list_box: &gtk::ListBox, selection: &Selection, sender: &ComponentSender<AppModel>) {
    while let Some(child) = list_box.first_child() {
        list_box.remove(&child);
    }
    for restaurant in selection.restaurants() {
        list_box.append(&build_row(restaurant, sender));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placepick::{Place, PlaceId, PlaceName};

    #[test]
    fn test_row_markup_escapes_names() {
        let mut restaurant = Restaurant::from_place(
            PlaceId::from(0),
            Place {
                name: PlaceName::from("Fish & <Chips>"),
                rating: Some(4.5),
                ..Place::default()
            },
        );
        restaurant.selected = true;

        let markup = row_markup(&restaurant);
        assert!(markup.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(markup.contains("4.5 ★"));
    }
}
