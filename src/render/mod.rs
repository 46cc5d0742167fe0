//! Plain-text renderings of each page, printed by the CLI.

use crate::models::{BlogPost, Property};
use crate::router::View;
use chrono::{DateTime, Utc};

const BRAND: &str = "🏡 Kimia RealEstate";

/// Beyond this, f64 cannot hold whole cents.
const MAX_CENT_PRECISION: f64 = 1e15;

/// `$1,250,000`; fractional prices keep two decimals.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "Price on request".to_string();
    }
    let negative = price < 0.0;
    let magnitude = price.abs();
    let (digits, fraction) = if magnitude < MAX_CENT_PRECISION {
        let cents = (magnitude * 100.0).round() as u64;
        ((cents / 100).to_string(), cents % 100)
    } else {
        (format!("{:.0}", magnitude.round()), 0)
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction:02}")
    }
}

pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Short label for an image reference; embedded data is never printed.
pub fn describe_image(reference: &str) -> String {
    match reference.strip_prefix("data:") {
        Some(rest) => {
            let (mime, payload) = rest.split_once(";base64,").unwrap_or((rest, ""));
            let bytes = payload.len() / 4 * 3;
            format!("embedded {mime} (~{} KB)", bytes.div_ceil(1024))
        }
        None => reference.to_string(),
    }
}

pub fn navbar(current: View, authenticated: bool) -> String {
    let mut links = vec![
        (View::Home, "Home"),
        (View::Properties, "Properties"),
        (View::Blog, "Blog"),
    ];
    if authenticated {
        links.push((View::Admin, "Admin Panel"));
    } else {
        links.push((View::Login, "Admin Login"));
    }

    let mut items: Vec<String> = links
        .into_iter()
        .map(|(view, label)| {
            if view == current {
                format!("[{label}]")
            } else {
                label.to_string()
            }
        })
        .collect();
    if authenticated {
        items.push("Logout".to_string());
    }

    format!("{BRAND}  |  {}", items.join("  "))
}

pub fn home() -> String {
    [
        "Discover Your Perfect Home",
        "Experience luxury living with Kimia RealEstate - Where dreams meet reality",
        "",
        "Why Choose Kimia RealEstate?",
        "  🔍 Expert Consultation: professional guidance from experienced real estate experts",
        "  🏆 Luxury Properties: a curated portfolio of premium homes",
        "  🤝 Personal Service: support from first viewing to closing",
    ]
    .join("\n")
}

pub fn property_card(property: &Property) -> String {
    let image = property
        .images
        .first()
        .map(|img| describe_image(img.as_str()))
        .unwrap_or_else(|| "📷 No Image".to_string());

    [
        format!("{} [{}]", property.title, property.status),
        format!("  📍 {}", property.location),
        format!("  {}", format_price(property.price)),
        format!(
            "  🛏 {} beds  🚿 {} baths  📐 {} sq ft  ({})",
            property.bedrooms, property.bathrooms, property.area, property.property_type
        ),
        format!("  {image}"),
        format!("  id: {}", property.id),
    ]
    .join("\n")
}

/// The catalog grid, or the loading/empty placeholders.
pub fn property_list(properties: &[Property], loading: bool) -> String {
    if loading {
        return "Loading premium properties...".to_string();
    }
    if properties.is_empty() {
        return "No properties found\nTry adjusting your search criteria".to_string();
    }
    properties
        .iter()
        .map(property_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn property_detail(property: &Property) -> String {
    let mut lines = vec![
        "← Back to Properties".to_string(),
        String::new(),
        property.title.clone(),
        format!("{}  {}", format_price(property.price), property.status),
        String::new(),
    ];

    if property.images.is_empty() {
        lines.push("📷 No Images Available".to_string());
    } else {
        lines.extend(
            property
                .images
                .iter()
                .enumerate()
                .map(|(i, img)| format!("Image {}: {}", i + 1, describe_image(img))),
        );
    }

    lines.extend([
        String::new(),
        "Property Details".to_string(),
        format!("  Location:  📍 {}", property.location),
        format!("  Type:      {}", property.property_type),
        format!("  Bedrooms:  🛏 {}", property.bedrooms),
        format!("  Bathrooms: 🚿 {}", property.bathrooms),
        format!("  Area:      📐 {} sq ft", property.area),
    ]);

    if !property.features.is_empty() {
        lines.push(String::new());
        lines.push("Features".to_string());
        lines.extend(property.features.iter().map(|f| format!("  ✓ {f}")));
    }

    lines.extend([
        String::new(),
        "Description".to_string(),
        property.description.clone(),
    ]);
    lines.join("\n")
}

pub fn blog_card(post: &BlogPost) -> String {
    let mut lines = vec![
        format!("[{}] {}", post.category, post.title),
        format!("  {}", post.excerpt),
        format!("  By {}  {}", post.author, format_date(post.created_at)),
    ];
    if let Some(image) = post.image() {
        lines.push(format!("  {}", describe_image(image)));
    }
    lines.push(format!("  id: {}", post.id));
    lines.join("\n")
}

pub fn blog_list(posts: &[BlogPost], loading: bool) -> String {
    if loading {
        return "Loading articles...".to_string();
    }
    if posts.is_empty() {
        return "No blog posts available\nCheck back soon for expert real estate insights!"
            .to_string();
    }
    let cards: Vec<String> = posts.iter().map(blog_card).collect();
    format!(
        "Real Estate Insights\n\n{}",
        cards.join("\n\n")
    )
}

/// Full article; blank lines in the content are dropped.
pub fn blog_detail(post: &BlogPost) -> String {
    let mut lines = vec!["← Back to Blog".to_string(), String::new()];
    if let Some(image) = post.image() {
        lines.push(describe_image(image));
    }
    lines.extend([
        format!("[{}]", post.category),
        post.title.clone(),
        format!("By {}  {}", post.author, format_date(post.created_at)),
        String::new(),
    ]);
    lines.extend(
        post.content
            .split('\n')
            .filter(|paragraph| !paragraph.trim().is_empty())
            .map(str::to_string),
    );
    lines.join("\n")
}

pub fn admin_property_table(properties: &[Property]) -> String {
    let mut rows = vec![format!(
        "{:<10} {:<32} {:>14} {:<22} {:<10}",
        "ID", "Title", "Price", "Location", "Status"
    )];
    rows.extend(properties.iter().map(|p| {
        format!(
            "{:<10} {:<32} {:>14} {:<22} {:<10}",
            truncate(&p.id, 10),
            truncate(&p.title, 32),
            format_price(p.price),
            truncate(&p.location, 22),
            p.status
        )
    }));
    rows.join("\n")
}

pub fn admin_blog_table(posts: &[BlogPost]) -> String {
    let mut rows = vec![format!(
        "{:<10} {:<36} {:<16} {:<10} {:<10}",
        "ID", "Title", "Category", "Status", "Created"
    )];
    rows.extend(posts.iter().map(|post| {
        format!(
            "{:<10} {:<36} {:<16} {:<10} {:<10}",
            truncate(&post.id, 10),
            truncate(&post.title, 36),
            post.category.as_str(),
            if post.published { "Published" } else { "Draft" },
            format_date(post.created_at)
        )
    }));
    rows.join("\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}
