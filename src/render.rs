//! Server-rendered HTML pages.
//!
//! Pages are plain `format!` templates over the catalog model; every piece
//! of interpolated user data goes through [`escape`]. Listing cards carry a
//! WhatsApp contact link built from the configured agent number.

use crate::config::CONFIG;
use crate::db::models::{Category, Property, Status};
use crate::media;

const CATEGORY_OPTIONS: [&str; 3] = ["All", "Buy", "Rent"];

/// Minimal HTML entity escaping for text and attribute positions.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn whatsapp_link(title: &str) -> String {
    let text: String =
        url::form_urlencoded::byte_serialize(format!("I am interested in {title}").as_bytes())
            .collect();
    format!("https://wa.me/{}?text={}", CONFIG.whatsapp_number, text)
}

fn layout(title: &str, body: &str, admin: bool) -> String {
    let nav_right = if admin {
        r#"<a href="/add-property">Add Property</a> <a href="/logout">Logout</a>"#
    } else {
        r#"<a href="/admin">Admin</a>"#
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Dream Properties</title>
<style>
body {{ font-family: Arial, sans-serif; background: #f4f6f8; margin: 0; }}
header {{ background: #0d6efd; color: white; padding: 15px 25px; display: flex; justify-content: space-between; align-items: center; }}
header a {{ color: white; margin-left: 12px; text-decoration: none; }}
main {{ padding: 20px; }}
.card {{ background: white; border-radius: 10px; padding: 15px; margin: 10px; box-shadow: 0 0 10px #ccc; width: 300px; display: inline-block; vertical-align: top; }}
.card img {{ width: 100%; border-radius: 10px; }}
.badge {{ padding: 2px 8px; border-radius: 5px; color: white; font-size: 0.8em; }}
.badge-available {{ background: #198754; }}
.badge-sold {{ background: #dc3545; }}
.badge-rented {{ background: #6c757d; }}
.wa {{ background: #25d366; color: white; padding: 8px 12px; text-decoration: none; border-radius: 5px; }}
.admin-links a {{ margin-right: 10px; }}
form.filter input, form.filter select {{ padding: 6px; margin-right: 8px; }}
form.entry label {{ display: block; margin-top: 12px; font-weight: bold; }}
form.entry input, form.entry textarea, form.entry select {{ width: 320px; padding: 6px; }}
.error {{ color: #dc3545; }}
</style>
</head>
<body>
<header><a href="/" style="margin:0;font-size:1.3em">Dream Properties</a><nav>{nav_right}</nav></header>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

fn status_badge(status: Status) -> String {
    let class = match status {
        Status::Available => "badge-available",
        Status::Sold => "badge-sold",
        Status::Rented => "badge-rented",
    };
    format!(r#"<span class="badge {class}">{}</span>"#, status.as_str())
}

fn listing_card(p: &Property, admin: bool) -> String {
    let cover = media::optimized_url(&media::cover_url(p.image.as_deref()), 600);
    let admin_links = if admin {
        format!(
            r#"<div class="admin-links"><a href="/edit-property/{id}">Edit</a> <a href="/delete-property/{id}" style="color:#dc3545">Delete</a></div>"#,
            id = p.id
        )
    } else {
        String::new()
    };
    format!(
        r#"<div class="card">
<a href="/property/{id}"><img src="{cover}" alt="{title}"></a>
<h3><a href="/property/{id}">{title}</a> {badge}</h3>
&#128205; {location}<br>
&#128176; <b>{price}</b> &middot; {category}<br><br>
<a class="wa" href="{wa}">WhatsApp Now</a>
{admin_links}
</div>"#,
        id = p.id,
        cover = escape(&cover),
        title = escape(&p.title),
        badge = status_badge(p.status),
        location = escape(&p.location),
        price = escape(&p.price),
        category = p.category.as_str(),
        wa = escape(&whatsapp_link(&p.title)),
    )
}

pub fn home_page(
    properties: &[Property],
    selected_category: Option<Category>,
    location_filter: Option<&str>,
    admin: bool,
) -> String {
    let options: String = CATEGORY_OPTIONS
        .iter()
        .map(|name| {
            let selected = match selected_category {
                Some(cat) if cat.as_str() == *name => " selected",
                None if *name == "All" => " selected",
                _ => "",
            };
            format!(r#"<option value="{name}"{selected}>{name}</option>"#)
        })
        .collect();
    let filter_form = format!(
        r#"<form class="filter" method="get" action="/">
<select name="category">{options}</select>
<input name="location" placeholder="Location" value="{location}">
<button type="submit">Search</button>
</form>"#,
        location = escape(location_filter.unwrap_or_default()),
    );

    let grid: String = if properties.is_empty() {
        "<p>No properties match your search.</p>".to_string()
    } else {
        properties.iter().map(|p| listing_card(p, admin)).collect()
    };

    let body = format!("<h2>Find Your Perfect Home</h2>\n{filter_form}<hr>\n{grid}");
    layout("Catalog", &body, admin)
}

pub fn detail_page(p: &Property, admin: bool) -> String {
    let gallery: String = media::image_urls(p.image.as_deref())
        .iter()
        .map(|u| {
            format!(
                r#"<img src="{}" alt="{}" style="max-width:640px;display:block;margin-bottom:10px;border-radius:10px">"#,
                escape(&media::optimized_url(u, 1200)),
                escape(&p.title),
            )
        })
        .collect();
    let video = media::embed_url(p.video_url.as_deref())
        .map(|embed| {
            format!(
                r#"<h3>Video tour</h3><iframe width="640" height="360" src="{}" frameborder="0" allowfullscreen></iframe>"#,
                escape(&embed)
            )
        })
        .unwrap_or_default();
    let admin_links = if admin {
        format!(
            r#"<p class="admin-links"><a href="/edit-property/{id}">Edit</a> <a href="/delete-property/{id}" style="color:#dc3545">Delete</a></p>"#,
            id = p.id
        )
    } else {
        String::new()
    };
    let body = format!(
        r#"<h2>{title} {badge}</h2>
{gallery}
<p>&#128205; {location} &middot; {category}</p>
<p>&#128176; <b>{price}</b></p>
<p>{description}</p>
<p><small>Listed on {listed}</small></p>
{video}
<p><a class="wa" href="{wa}">WhatsApp Now</a></p>
{admin_links}
<p><a href="/">&larr; Back to catalog</a></p>"#,
        title = escape(&p.title),
        badge = status_badge(p.status),
        location = escape(&p.location),
        category = p.category.as_str(),
        price = escape(&p.price),
        description = escape(&p.description),
        listed = p.created_at.format("%d %b %Y"),
        wa = escape(&whatsapp_link(&p.title)),
    );
    layout(&p.title, &body, admin)
}

pub fn login_page(error: Option<&str>) -> String {
    let message = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let body = format!(
        r#"<h2>Admin Login</h2>
{message}
<form class="entry" method="post" action="/login">
<label>Username</label><input name="username">
<label>Password</label><input name="password" type="password">
<br><br><button type="submit">Login</button>
</form>"#
    );
    layout("Admin Login", &body, false)
}

fn category_select(selected: Category) -> String {
    Category::ALL
        .iter()
        .map(|cat| {
            let flag = if *cat == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{flag}>{0}</option>"#, cat.as_str())
        })
        .collect()
}

fn status_select(selected: Status) -> String {
    Status::ALL
        .iter()
        .map(|status| {
            let flag = if *status == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{flag}>{0}</option>"#, status.as_str())
        })
        .collect()
}

pub fn add_property_page() -> String {
    let body = format!(
        r#"<h2>Add Property</h2>
<form class="entry" method="post" action="/add-property" enctype="multipart/form-data">
<label>Title</label><input name="title" required>
<label>Location</label><input name="location" required>
<label>Price</label><input name="price" required>
<label>Description</label><textarea name="description" rows="4"></textarea>
<label>Category</label><select name="category">{categories}</select>
<label>Video URL (optional)</label><input name="video_url">
<label>Images</label><input type="file" name="images" accept="image/*" multiple>
<br><br><button type="submit">Save Property</button>
</form>"#,
        categories = category_select(Category::Buy),
    );
    layout("Add Property", &body, true)
}

pub fn edit_property_page(p: &Property) -> String {
    let body = format!(
        r#"<h2>Edit Property #{id}</h2>
<form class="entry" method="post" action="/edit-property/{id}">
<label>Title</label><input name="title" value="{title}" required>
<label>Location</label><input name="location" value="{location}" required>
<label>Price</label><input name="price" value="{price}" required>
<label>Description</label><textarea name="description" rows="4">{description}</textarea>
<label>Category</label><select name="category">{categories}</select>
<label>Status</label><select name="status">{statuses}</select>
<label>Video URL</label><input name="video_url" value="{video_url}">
<label>Image field (URL or JSON list)</label><textarea name="image" rows="3">{image}</textarea>
<br><br><button type="submit">Save Changes</button>
</form>
<p><a href="/property/{id}">Cancel</a></p>"#,
        id = p.id,
        title = escape(&p.title),
        location = escape(&p.location),
        price = escape(&p.price),
        description = escape(&p.description),
        categories = category_select(p.category),
        statuses = status_select(p.status),
        video_url = escape(p.video_url.as_deref().unwrap_or_default()),
        image = escape(p.image.as_deref().unwrap_or_default()),
    );
    layout("Edit Property", &body, true)
}

pub fn not_found_page(id: i64) -> String {
    let body = format!(
        r#"<h2>Property Not Found</h2>
<p>No listing with id {id} exists. It may have been sold and removed.</p>
<p><a href="/">&larr; Back to catalog</a></p>"#
    );
    layout("Not Found", &body, false)
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<h2>{}</h2><p>{}</p><p><a href="/">&larr; Back to catalog</a></p>"#,
        escape(title),
        escape(message),
    );
    layout(title, &body, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample() -> Property {
        Property {
            id: 7,
            title: "2BHK <script>".to_string(),
            location: "Virar".to_string(),
            price: "45 Lakh".to_string(),
            description: "Spacious & bright".to_string(),
            image: Some(r#"["https://res.cloudinary.com/demo/image/upload/v1/a.jpg"]"#.to_string()),
            category: Category::Rent,
            status: Status::Available,
            video_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<b onmouseover="x('y')">&"#),
            "&lt;b onmouseover=&quot;x(&#39;y&#39;)&quot;&gt;&amp;"
        );
    }

    #[test]
    fn listing_card_escapes_user_data_and_links_the_detail_page() {
        let html = listing_card(&sample(), false);
        assert!(html.contains("2BHK &lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"href="/property/7""#));
        assert!(html.contains("wa.me/"));
        // Cover is the optimized Cloudinary rendition.
        assert!(html.contains("/upload/w_600,c_fill,q_auto,f_auto/"));
    }

    #[test]
    fn admin_controls_only_render_for_admins() {
        let public = home_page(&[sample()], None, None, false);
        assert!(!public.contains("/delete-property/7"));
        let admin = home_page(&[sample()], None, None, true);
        assert!(admin.contains("/delete-property/7"));
        assert!(admin.contains("/edit-property/7"));
    }

    #[test]
    fn detail_page_embeds_recognized_videos_only() {
        let with_video = detail_page(&sample(), false);
        assert!(with_video.contains("youtube.com/embed/dQw4w9WgXcQ"));

        let mut no_video = sample();
        no_video.video_url = Some("https://example.com/not-a-video".to_string());
        assert!(!detail_page(&no_video, false).contains("<iframe"));
    }

    #[test]
    fn entry_forms_offer_every_category_and_status() {
        let add = add_property_page();
        for cat in Category::ALL {
            assert!(add.contains(&format!(r#"value="{}""#, cat.as_str())), "{cat}");
        }
        let edit = edit_property_page(&sample());
        for status in Status::ALL {
            assert!(edit.contains(&format!(r#"value="{}""#, status.as_str())), "{status}");
        }
        // The listing's own values come back pre-selected.
        assert!(edit.contains(r#"<option value="Rent" selected>"#));
        assert!(edit.contains(r#"<option value="Available" selected>"#));
    }

    #[test]
    fn home_page_keeps_the_active_filter_selected() {
        let html = home_page(&[], Some(Category::Rent), Some("Virar"), false);
        assert!(html.contains(r#"<option value="Rent" selected>"#));
        assert!(html.contains(r#"value="Virar""#));
        assert!(html.contains("No properties match"));
    }
}
