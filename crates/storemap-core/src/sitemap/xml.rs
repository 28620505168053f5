//! Sitemap protocol XML encoding.
//!
//! URL sets are rendered piecewise (header, one fragment per `<url>`, footer)
//! so the writer can measure each fragment before deciding which file it
//! goes to. Text content is escaped by `quick-xml`.

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::entry::SiteEntry;
use super::writer::SitemapError;

/// Sitemap protocol namespace.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Date format of `<lastmod>` values (W3C date).
const LASTMOD_FORMAT: &str = "%Y-%m-%d";

/// XML declaration followed by the opening `<urlset>`.
pub(super) fn urlset_header() -> Result<Vec<u8>, SitemapError> {
    document_header("urlset")
}

/// Closing `</urlset>`.
pub(super) fn urlset_footer() -> Result<Vec<u8>, SitemapError> {
    document_footer("urlset")
}

/// One `<url>` element, with `loc` = `base_url` + entry URL.
pub(super) fn url_fragment(entry: &SiteEntry, base_url: &str) -> Result<Vec<u8>, SitemapError> {
    let mut writer = Writer::new(Vec::new());
    let loc = format!("{base_url}{}", entry.url());

    start(&mut writer, "url")?;
    text_element(&mut writer, "loc", &loc)?;
    text_element(&mut writer, "priority", &format_priority(entry.priority()))?;
    if let Some(change_frequency) = entry.change_frequency() {
        text_element(&mut writer, "changefreq", change_frequency.as_str())?;
    }
    if let Some(last_modified) = entry.last_modified() {
        text_element(
            &mut writer,
            "lastmod",
            &last_modified.format(LASTMOD_FORMAT).to_string(),
        )?;
    }
    end(&mut writer, "url")?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

/// Complete `<sitemapindex>` document listing `locations`.
pub(super) fn sitemap_index(
    locations: &[String],
    lastmod: NaiveDate,
) -> Result<Vec<u8>, SitemapError> {
    let lastmod = lastmod.format(LASTMOD_FORMAT).to_string();

    let mut out = document_header("sitemapindex")?;
    for loc in locations {
        let mut writer = Writer::new(Vec::new());
        start(&mut writer, "sitemap")?;
        text_element(&mut writer, "loc", loc)?;
        text_element(&mut writer, "lastmod", &lastmod)?;
        end(&mut writer, "sitemap")?;
        out.extend_from_slice(&writer.into_inner());
        out.push(b'\n');
    }
    out.extend_from_slice(&document_footer("sitemapindex")?);
    Ok(out)
}

/// Shortest decimal form of `priority`, always with a fractional part
/// (`1.0`, `0.5`, `0.25`).
fn format_priority(priority: f32) -> String {
    let mut out = priority.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}

fn document_header(root: &str) -> Result<Vec<u8>, SitemapError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(SitemapError::encode)?;
    writer.get_mut().push(b'\n');

    let mut root_start = BytesStart::new(root);
    root_start.push_attribute(("xmlns", SITEMAP_NS));
    writer
        .write_event(Event::Start(root_start))
        .map_err(SitemapError::encode)?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

fn document_footer(root: &str) -> Result<Vec<u8>, SitemapError> {
    let mut writer = Writer::new(Vec::new());
    end(&mut writer, root)?;
    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}

fn start(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), SitemapError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(SitemapError::encode)
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), SitemapError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(SitemapError::encode)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), SitemapError> {
    start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(SitemapError::encode)?;
    end(writer, name)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sitemap::ChangeFrequency;

    fn as_str(bytes: &[u8]) -> &str {
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_urlset_header() {
        let header = urlset_header().unwrap();

        assert_eq!(
            as_str(&header),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n"
        );
    }

    #[test]
    fn test_url_fragment_full() {
        let updated = NaiveDate::from_ymd_opt(2019, 3, 22)
            .and_then(|d| d.and_hms_opt(15, 31, 0))
            .unwrap();
        let entry = SiteEntry::new("/p/ABC/shoe.html")
            .with_priority(1.0)
            .with_change_frequency(ChangeFrequency::Daily)
            .with_last_modified(Some(updated));

        let fragment = url_fragment(&entry, "https://shop.example.com").unwrap();

        assert_eq!(
            as_str(&fragment),
            "<url><loc>https://shop.example.com/p/ABC/shoe.html</loc>\
             <priority>1.0</priority><changefreq>daily</changefreq>\
             <lastmod>2019-03-22</lastmod></url>\n"
        );
    }

    #[test]
    fn test_url_fragment_omits_unset_fields() {
        let fragment = url_fragment(&SiteEntry::new("/"), "https://shop.example.com").unwrap();

        assert_eq!(
            as_str(&fragment),
            "<url><loc>https://shop.example.com/</loc><priority>0.5</priority></url>\n"
        );
    }

    #[test]
    fn test_url_fragment_keeps_priority_precision() {
        let entry = SiteEntry::new("/").with_priority(0.25);

        let fragment = url_fragment(&entry, "").unwrap();

        assert_eq!(
            as_str(&fragment),
            "<url><loc>/</loc><priority>0.25</priority></url>\n"
        );
    }

    #[test]
    fn test_format_priority() {
        assert_eq!(format_priority(1.0), "1.0");
        assert_eq!(format_priority(0.0), "0.0");
        assert_eq!(format_priority(0.5), "0.5");
        assert_eq!(format_priority(0.8), "0.8");
        assert_eq!(format_priority(0.125), "0.125");
    }

    #[test]
    fn test_url_fragment_escapes_text() {
        let entry = SiteEntry::new("/c/bags&belts");

        let fragment = url_fragment(&entry, "https://shop.example.com").unwrap();

        assert!(as_str(&fragment).contains("<loc>https://shop.example.com/c/bags&amp;belts</loc>"));
    }

    #[test]
    fn test_sitemap_index_document() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let locations = vec![
            "https://shop.example.com/sitemap-1.xml".to_owned(),
            "https://shop.example.com/sitemap-2.xml".to_owned(),
        ];

        let index = sitemap_index(&locations, date).unwrap();

        assert_eq!(
            as_str(&index),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             <sitemap><loc>https://shop.example.com/sitemap-1.xml</loc><lastmod>2024-05-01</lastmod></sitemap>\n\
             <sitemap><loc>https://shop.example.com/sitemap-2.xml</loc><lastmod>2024-05-01</lastmod></sitemap>\n\
             </sitemapindex>\n"
        );
    }
}
