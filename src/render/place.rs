//! Place card and place detail rendering

use super::Fragment;
use crate::models::Place;

/// Page that shows a single place, linked from every card
pub const PLACE_PAGE: &str = "place.html";

const UNTITLED: &str = "Untitled place";

/// Format a price without trailing `.00` for whole amounts
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{:.0}", price)
    } else {
        format!("{:.2}", price)
    }
}

fn title(place: &Place) -> &str {
    place
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
}

/// Link to the detail page of a place
pub fn place_href(place: &Place) -> String {
    format!("{}?id={}", PLACE_PAGE, urlencoding::encode(&place.id))
}

/// One card for the places list.
///
/// The raw price lands in `data-price`, which the price filter reads back.
pub fn place_card(place: &Place) -> Fragment {
    let price = place.price.map(format_price);

    let mut card = Fragment::new("div")
        .class("place-card")
        .attr("data-id", place.id.as_str())
        .attr("data-price", price.clone().unwrap_or_default());

    if let Some(image) = place.images().first() {
        card = card.child(
            Fragment::new("img")
                .class("place-image")
                .attr("src", image.as_str())
                .attr("alt", title(place)),
        );
    }

    card.child(Fragment::new("h2").class("place-name").text(title(place)))
        .child(Fragment::new("p").class("place-price").text(match price {
            Some(price) => format!("Price per night: ${}", price),
            None => "Price not available".to_string(),
        }))
        .child(
            Fragment::new("a")
                .class("details-button")
                .attr("href", place_href(place))
                .text("View Details"),
        )
}

/// Cards for every place, in API order
pub fn place_cards(places: &[Place]) -> Vec<Fragment> {
    places.iter().map(place_card).collect()
}

/// Shown in the list area when places could not be loaded
pub fn places_unavailable() -> Fragment {
    Fragment::new("p")
        .class("places-error")
        .text("Failed to load places.")
}

fn info_line(label: &str, value: String) -> Fragment {
    Fragment::new("p")
        .child(Fragment::new("strong").text(format!("{}:", label)))
        .text(format!(" {}", value))
}

/// The detail block of the place page
pub fn place_details(place: &Place) -> Fragment {
    let mut details = Fragment::new("div")
        .class("place-details")
        .attr("data-id", place.id.as_str())
        .child(Fragment::new("h1").class("place-title").text(title(place)));

    let images = place.images();
    if !images.is_empty() {
        details = details.child(
            Fragment::new("div").class("place-images").children(images.iter().map(|src| {
                Fragment::new("img")
                    .class("place-image")
                    .attr("src", src.as_str())
                    .attr("alt", title(place))
            })),
        );
    }

    let description = place
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available")
        .to_string();

    let location = match (place.latitude, place.longitude) {
        (Some(lat), Some(lng)) => format!("{}, {}", lat, lng),
        _ => "Location not available".to_string(),
    };

    let amenities = place.amenity_names();
    let amenities = if amenities.is_empty() {
        Fragment::new("p")
            .class("no-amenities")
            .text("No amenities listed")
    } else {
        Fragment::new("ul")
            .class("amenities")
            .children(amenities.into_iter().map(|name| Fragment::new("li").text(name)))
    };

    details.child(
        Fragment::new("div")
            .class("place-info")
            .child(info_line(
                "Host",
                place.owner_name().unwrap_or_else(|| "Unknown host".to_string()),
            ))
            .child(info_line(
                "Price per night",
                place
                    .price
                    .map(|p| format!("${}", format_price(p)))
                    .unwrap_or_else(|| "Price not available".to_string()),
            ))
            .child(info_line("Description", description))
            .child(info_line("Location", location))
            .child(Fragment::new("h3").text("Amenities"))
            .child(amenities),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, Owner};

    fn sample() -> Place {
        Place {
            id: "p 1".into(),
            title: Some("Beach <House>".into()),
            price: Some(100.0),
            description: Some("Sea view".into()),
            latitude: Some(43.5),
            longitude: Some(5.25),
            images: Some(vec!["beach.jpg".into()]),
            owner: Some(Owner {
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                ..Default::default()
            }),
            amenities: Some(vec![Amenity {
                id: None,
                name: Some("Wifi".into()),
            }]),
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(100.0), "100");
        assert_eq!(format_price(99.5), "99.50");
        assert_eq!(format_price(0.0), "0");
    }

    #[test]
    fn test_place_card() {
        let card = place_card(&sample());
        assert!(card.has_class("place-card"));
        assert_eq!(card.get_attr("data-price"), Some("100"));
        assert_eq!(card.get_attr("data-id"), Some("p 1"));

        let link = card.find_by_class("details-button").unwrap();
        assert_eq!(link.get_attr("href"), Some("place.html?id=p%201"));

        let html = card.to_html();
        assert!(html.contains("Beach &lt;House&gt;"));
        assert!(html.contains("Price per night: $100"));
        assert!(html.contains(r#"src="beach.jpg""#));
    }

    #[test]
    fn test_place_card_placeholders() {
        let card = place_card(&Place {
            id: "p2".into(),
            ..Default::default()
        });
        assert_eq!(card.get_attr("data-price"), Some(""));
        assert!(card.find_by_class("place-image").is_none());
        assert!(card.text_content().contains(UNTITLED));
        assert!(card.text_content().contains("Price not available"));
    }

    #[test]
    fn test_place_details() {
        let details = place_details(&sample());
        let text = details.text_content();
        assert!(text.contains("Host: Ada Lovelace"));
        assert!(text.contains("Price per night: $100"));
        assert!(text.contains("Description: Sea view"));
        assert!(text.contains("Location: 43.5, 5.25"));
        assert_eq!(details.find_by_class("amenities").unwrap().text_content(), "Wifi");
    }

    #[test]
    fn test_place_details_placeholders() {
        let details = place_details(&Place::default());
        let text = details.text_content();
        assert!(text.contains("Host: Unknown host"));
        assert!(text.contains("No description available"));
        assert!(text.contains("Location not available"));
        assert!(text.contains("No amenities listed"));
        assert!(details.find_by_class("place-images").is_none());
    }
}
