use chrono::NaiveDate;

use super::*;

const BASE: &str = "https://www.prospektmaschine.de";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 5)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// One brochure tile as it appears on a shop page: image block and
/// description block side by side inside `div.brochure-thumbnail`.
fn tile(img: &str, validity: &str, title: &str, href: &str) -> String {
    format!(
        r#"<div class="brochure-thumbnail">
             <a href="{href}"><div class="img-container">{img}</div></a>
             <div class="letak-info">
               <div class="letak-description">
                 <p class="grid-item-content"><strong>{title}</strong></p>
                 <a href="{href}"><small class="hidden-sm">{validity}</small></a>
               </div>
             </div>
           </div>"#
    )
}

fn page(tiles: &[String]) -> String {
    format!(
        r#"<html><body><div class="page-header"><h1>Kaufland</h1></div>
           <div class="letaky-grid">{}</div></body></html>"#,
        tiles.join("\n")
    )
}

#[test]
fn extracts_record_with_lazy_loaded_thumbnail_and_absolute_link() {
    let html = page(&[tile(
        r#"<img data-src="https://img.prospektmaschine.de/kaufland-1.jpg" alt="">"#,
        "03.03.2025 - 08.03.2025",
        "Wochenangebote",
        "/kaufland/wochenangebote-123/",
    )]);

    let records = extract_at(&html, "Kaufland", BASE, now());

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.title, "Wochenangebote");
    assert_eq!(record.shop_name, "Kaufland");
    assert_eq!(
        record.link,
        "https://www.prospektmaschine.de/kaufland/wochenangebote-123/"
    );
    assert_eq!(
        record.thumbnail,
        "https://img.prospektmaschine.de/kaufland-1.jpg"
    );
    assert_eq!(record.valid_from, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    assert_eq!(record.valid_to, NaiveDate::from_ymd_opt(2025, 3, 8));
    assert_eq!(record.parsed_time, "2025-03-05 10:00:00");
}

#[test]
fn prefers_src_over_data_src() {
    let html = page(&[tile(
        r#"<img src="/thumbs/eager.jpg" data-src="/thumbs/lazy.jpg">"#,
        "03.03.2025 - 08.03.2025",
        "Angebote",
        "/globus/angebote/",
    )]);

    let records = extract_at(&html, "Globus", BASE, now());
    assert_eq!(records[0].thumbnail, "/thumbs/eager.jpg");
}

#[test]
fn skips_images_without_source_attributes() {
    let html = page(&[tile(
        r#"<img class="placeholder"><img data-src="/thumbs/real.jpg">"#,
        "03.03.2025 - 08.03.2025",
        "Angebote",
        "/globus/angebote/",
    )]);

    let records = extract_at(&html, "Globus", BASE, now());
    assert_eq!(records[0].thumbnail, "/thumbs/real.jpg");
}

#[test]
fn filters_expired_and_undated_brochures() {
    let html = page(&[
        tile(r#"<img src="/a.jpg">"#, "01.01.2000 - 31.12.2000", "Alt", "/a/"),
        tile(r#"<img src="/b.jpg">"#, "03.03.2025 - 08.03.2025", "Aktuell", "/b/"),
        tile(r#"<img src="/c.jpg">"#, "demnächst", "Ohne Datum", "/c/"),
        tile(r#"<img src="/d.jpg">"#, "ab 01.03.2025", "Offen", "/d/"),
    ]);

    let records = extract_at(&html, "Real", BASE, now());
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Aktuell", "Offen"]);
    assert_eq!(records[1].valid_to, None);
}

#[test]
fn malformed_fragment_does_not_abort_siblings() {
    let broken = r#"<div class="brochure-thumbnail"><div class="letak-info">
        <div class="letak-description">
          <small class="hidden-sm">03.03.2025 - 08.03.2025</small>
        </div></div></div>"#
        .to_string();
    let html = page(&[
        broken,
        tile(r#"<img src="/ok.jpg">"#, "03.03.2025 - 08.03.2025", "Gut", "/ok/"),
    ]);

    let records = extract_at(&html, "Netto", BASE, now());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Gut");
}

#[test]
fn fragment_without_thumbnail_is_skipped() {
    let html = page(&[tile(
        "<span>kein Bild</span>",
        "03.03.2025 - 08.03.2025",
        "Ohne Bild",
        "/x/",
    )]);

    assert!(extract_at(&html, "Netto", BASE, now()).is_empty());
}

#[test]
fn page_without_grid_yields_no_records() {
    let html = "<html><body><p>Keine Prospekte</p></body></html>";
    assert!(extract_at(html, "Netto", BASE, now()).is_empty());
}

#[test]
fn descriptions_outside_the_grid_are_ignored() {
    let outside = tile(r#"<img src="/side.jpg">"#, "03.03.2025 - 08.03.2025", "Seite", "/s/");
    let html = format!(
        "<html><body>{outside}<div class=\"letaky-grid\">{}</div></body></html>",
        tile(r#"<img src="/in.jpg">"#, "03.03.2025 - 08.03.2025", "Innen", "/i/")
    );

    let records = extract_at(&html, "Netto", BASE, now());
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Innen"]);
}

#[test]
fn extraction_is_idempotent() {
    let html = page(&[
        tile(r#"<img data-src="/1.jpg">"#, "03.03.2025 - 08.03.2025", "Eins", "/1/"),
        tile(r#"<img src="/2.jpg">"#, "ab 04.03.2025", "Zwei", "/2/"),
    ]);

    let first = extract_at(&html, "Lidl", BASE, now());
    let second = extract_at(&html, "Lidl", BASE, now());
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn link_keeps_base_url_path_prefix() {
    let html = page(&[tile(
        r#"<img src="/1.jpg">"#,
        "03.03.2025 - 08.03.2025",
        "Eins",
        "/kaufland/eins/",
    )]);

    let records = extract_at(&html, "Kaufland", "https://www.prospektmaschine.de/de", now());
    assert_eq!(
        records[0].link,
        "https://www.prospektmaschine.de/de/kaufland/eins/"
    );
}
