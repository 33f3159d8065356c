use crate::domain::model::ImageDate;
use scraper::{Html, Selector};

/// Only images under this relative path are daily pictures.
pub const ARCHIVE_PREFIX: &str = "archive";
const ALT_SUFFIX: &str = "of the Day";

/// Finds the first `<img>` (document order) whose alt text contains
/// `"<Subject> of the Day"` and whose `src` starts with `archive`, and joins
/// its `src` onto `page_url`.
pub fn locate_image(html: &str, page_url: &str, subject: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img[alt]").ok()?;
    let phrase = format!("{} {}", capitalize(subject), ALT_SUFFIX);

    document
        .select(&selector)
        .find_map(|image| {
            let alt = image.value().attr("alt")?;
            let src = image.value().attr("src")?;
            (alt.contains(&phrase) && src.starts_with(ARCHIVE_PREFIX)).then_some(src)
        })
        .map(|src| format!("{}{}", page_url, src))
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Splits `https://host/archive/YYYY/MM/DD.ext` on `/` and takes segments
/// 4, 5 and 6, dropping the extension from the last one.
pub fn image_date(image_url: &str) -> Option<ImageDate> {
    let segments: Vec<&str> = image_url.split('/').collect();
    let year = segments.get(4)?;
    let month = segments.get(5)?;
    let day = segments.get(6)?;
    let day = day.split('.').next().unwrap_or(day);

    if year.is_empty() || month.is_empty() || day.is_empty() {
        return None;
    }

    Some(ImageDate {
        year: year.to_string(),
        month: month.to_string(),
        day: day.to_string(),
    })
}
