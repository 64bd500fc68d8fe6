//! ONIX field extractor
//!
//! Maps one structurally-normalized ONIX product node to the intermediate
//! record. Each field has an independent rule; absence at any level of a
//! path leaves that field absent, never an error.

use super::codes;
use super::value::Value;
use crate::config::{GradeRangeStyle, OnixOptions};
use crate::html::HtmlStrip;
use crate::models::book::BookType;
use crate::models::source_record::{OnixCreator, OnixRecord};

/// ONIX product extractor
pub struct OnixExtractor<'a> {
    html: &'a dyn HtmlStrip,
    options: &'a OnixOptions,
}

impl<'a> OnixExtractor<'a> {
    pub fn new(html: &'a dyn HtmlStrip, options: &'a OnixOptions) -> Self {
        Self { html, options }
    }

    /// Extract one product node into an intermediate record.
    pub fn extract(&self, product: &Value) -> OnixRecord {
        // ONIX short-tag positions
        // descriptivedetail/titledetail/titleelement - b203 title, b029 subtitle
        // descriptivedetail/contributor - b036 name, b035 role code
        // descriptivedetail/collection - series title + collectionsequence/x481
        // descriptivedetail/subject - b067 scheme, b069 code, b070 heading text
        // descriptivedetail/extent - b218 type, b219 value
        // descriptivedetail/audiencerange - b074 qualifier, b075 types, b076 values
        // descriptivedetail/b014 - product form code
        // collateraldetail/textcontent/d104 - description text
        // productidentifier - b221 type, b244 value
        // publishingdetail - copyrightstatement/b087, publisher/b081

        let descriptive = product.child("descriptivedetail");
        let collateral = product.child("collateraldetail");
        let publishing = product.child("publishingdetail");

        let title_element = descriptive
            .and_then(|d| d.child("titledetail"))
            .and_then(|t| t.child("titleelement"));

        let creators = seq_of(descriptive, "contributor")
            .iter()
            .map(|c| OnixCreator {
                name: text_of(c.child("b036")),
                role: c
                    .child("b035")
                    .and_then(Value::text)
                    .map(|code| codes::contributor_role(code).to_owned()),
            })
            .collect();

        let collection = descriptive.and_then(|d| d.child("collection"));
        let series_name = text_of(
            collection
                .and_then(|c| c.child("titledetail"))
                .and_then(|t| t.child("titleelement"))
                .and_then(|t| t.child("b203")),
        );
        let series_position = text_of(
            collection
                .and_then(|c| c.child("collectionsequence"))
                .and_then(|s| s.child("x481")),
        );

        let subjects = seq_of(descriptive, "subject");
        let (genre_main, subgenres) = extract_genre(subjects);

        let kind = if subjects.iter().any(|s| {
            s.child("b067").and_then(Value::text) == Some("10")
                && s.child("b069")
                    .and_then(Value::text)
                    .map_or(false, |code| code.starts_with("JNF"))
        }) {
            BookType::Nonfiction
        } else {
            BookType::Fiction
        };

        let bisac_categories = subjects
            .iter()
            .filter(|s| s.child("b067").and_then(Value::text) == Some("10"))
            .filter_map(|s| s.child("b069").and_then(Value::text))
            .map(|code| codes::bisac_category(code).to_owned())
            .collect();

        let identifiers = product.seq("productidentifier");

        OnixRecord {
            title_main: text_of(title_element.and_then(|t| t.child("b203"))),
            title_subtitle: text_of(title_element.and_then(|t| t.child("b029"))),
            creators,
            copyright_date: text_of(
                publishing
                    .and_then(|p| p.child("copyrightstatement"))
                    .and_then(|c| c.child("b087")),
            ),
            summary: self.extract_summary(seq_of(collateral, "textcontent")),
            series_name,
            series_position,
            genre_main,
            subgenres,
            form: descriptive
                .and_then(|d| d.child("b014"))
                .and_then(Value::text)
                .map(|code| codes::product_form(code).to_owned()),
            pages: seq_of(descriptive, "extent")
                .iter()
                .find(|e| e.child("b218").and_then(Value::text) == Some("00"))
                .and_then(|e| text_of(e.child("b219"))),
            isbn13: identifier_value(identifiers, "15"),
            isbn10: identifier_value(identifiers, "02"),
            kind,
            publisher: text_of(
                publishing
                    .and_then(|p| p.child("publisher"))
                    .and_then(|p| p.child("b081")),
            ),
            target_audience: self.extract_grade_range(seq_of(descriptive, "audiencerange")),
            bisac_categories,
        }
    }

    /// Concatenate every text-content block carrying a description payload.
    /// The payload may be a plain string, a single paragraph, a paragraph
    /// list, or an element with embedded character data; paragraph texts
    /// join with single spaces and markup is stripped per block.
    fn extract_summary(&self, blocks: &[Value]) -> Option<String> {
        let mut parts = Vec::new();
        for block in blocks {
            let Some(payload) = block.child("d104") else {
                continue;
            };
            let raw = match payload {
                Value::Text(s) => s.clone(),
                Value::Element(el) => {
                    let paragraphs = el.seq("p");
                    if paragraphs.is_empty() {
                        el.text().unwrap_or_default().to_owned()
                    } else {
                        paragraphs
                            .iter()
                            .filter_map(Value::text)
                            .collect::<Vec<_>>()
                            .join(" ")
                    }
                }
            };
            if raw.is_empty() {
                continue;
            }
            parts.push(self.html.strip(&raw));
        }

        if parts.is_empty() {
            return None;
        }
        let joined = parts.join(" ").trim().to_owned();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Format the US grade-level range (`b074 == "17"`) as `Grade {start}-{end}`.
    /// Range-type codes and range values pair by index; `"03"` marks a start
    /// grade, `"04"` an end grade.
    fn extract_grade_range(&self, ranges: &[Value]) -> Option<String> {
        let grade = ranges
            .iter()
            .find(|r| r.child("b074").and_then(Value::text) == Some("17"))?;

        let types = grade.seq("b075");
        let values = grade.seq("b076");

        let mut start = None;
        let mut end = None;
        for (i, range_type) in types.iter().enumerate() {
            let value = values
                .get(i)
                .and_then(Value::text)
                .filter(|v| !v.is_empty());
            match range_type.text() {
                Some("03") if start.is_none() => start = value,
                Some("04") if end.is_none() => end = value,
                _ => {}
            }
        }

        match self.options.grade_range {
            GradeRangeStyle::OmitWhenEmpty if start.is_none() && end.is_none() => None,
            _ => Some(format!(
                "Grade {}-{}",
                start.unwrap_or("Unknown"),
                end.unwrap_or("Unknown")
            )),
        }
    }
}

fn text_of(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::text).map(str::to_owned)
}

fn seq_of<'v>(value: Option<&'v Value>, name: &str) -> &'v [Value] {
    value.map(|v| v.seq(name)).unwrap_or(&[])
}

fn identifier_value(identifiers: &[Value], id_type: &str) -> Option<String> {
    identifiers
        .iter()
        .find(|id| id.child("b221").and_then(Value::text) == Some(id_type))
        .and_then(|id| text_of(id.child("b244")))
}

/// Split the first genre heading (`b070`) on `/`: the first trimmed part is
/// the main genre verbatim, remaining non-empty parts are subgenres in
/// order. Only subgenres are filtered for empties.
fn extract_genre(subjects: &[Value]) -> (Option<String>, Vec<String>) {
    let Some(heading) = subjects
        .iter()
        .find_map(|s| s.child("b070").and_then(Value::text).filter(|t| !t.is_empty()))
    else {
        return (None, Vec::new());
    };

    let mut parts = heading.split('/').map(str::trim);
    let main = parts.next().map(str::to_owned);
    let subgenres = parts.filter(|p| !p.is_empty()).map(str::to_owned).collect();
    (main, subgenres)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::MarkupStripper;
    use crate::onix::value::parse_document;

    fn extract(product_body: &str) -> OnixRecord {
        extract_with(product_body, &OnixOptions::default())
    }

    fn extract_with(product_body: &str, options: &OnixOptions) -> OnixRecord {
        let xml = format!("<product>{product_body}</product>");
        let root = parse_document(&xml).unwrap();
        let product = root.child("product").unwrap().clone();
        OnixExtractor::new(&MarkupStripper, options).extract(&product)
    }

    #[test]
    fn test_title_and_subtitle() {
        let record = extract(
            "<descriptivedetail><titledetail><titleelement>\
             <b203>The Sea</b203><b029>A Natural History</b029>\
             </titleelement></titledetail></descriptivedetail>",
        );
        assert_eq!(record.title_main.as_deref(), Some("The Sea"));
        assert_eq!(record.title_subtitle.as_deref(), Some("A Natural History"));
    }

    #[test]
    fn test_contributor_role_lookup_and_passthrough() {
        let record = extract(
            "<descriptivedetail>\
             <contributor><b035>A01</b035><b036>Jane Doe</b036></contributor>\
             <contributor><b035>Z99</b035><b036>John Roe</b036></contributor>\
             </descriptivedetail>",
        );
        assert_eq!(record.creators.len(), 2);
        assert_eq!(record.creators[0].role.as_deref(), Some("Author"));
        assert_eq!(record.creators[1].role.as_deref(), Some("Z99"));
    }

    #[test]
    fn test_summary_plain_string() {
        let record = extract(
            "<collateraldetail><textcontent><d104>A plain summary.</d104></textcontent>\
             </collateraldetail>",
        );
        assert_eq!(record.summary.as_deref(), Some("A plain summary."));
    }

    #[test]
    fn test_summary_paragraph_list_joined() {
        let record = extract(
            "<collateraldetail><textcontent><d104>\
             <p>First paragraph.</p><p>Second paragraph.</p>\
             </d104></textcontent></collateraldetail>",
        );
        assert_eq!(
            record.summary.as_deref(),
            Some("First paragraph. Second paragraph.")
        );
    }

    #[test]
    fn test_summary_multiple_blocks_in_order() {
        let record = extract(
            "<collateraldetail>\
             <textcontent><d104>Block one.</d104></textcontent>\
             <textcontent><d104><p>Block two.</p></d104></textcontent>\
             </collateraldetail>",
        );
        assert_eq!(record.summary.as_deref(), Some("Block one. Block two."));
    }

    #[test]
    fn test_summary_strips_escaped_markup() {
        let record = extract(
            "<collateraldetail><textcontent>\
             <d104>&lt;p&gt;Rendered &lt;b&gt;bold&lt;/b&gt; text.&lt;/p&gt;</d104>\
             </textcontent></collateraldetail>",
        );
        assert_eq!(record.summary.as_deref(), Some("Rendered bold text."));
    }

    #[test]
    fn test_summary_absent_without_description_payload() {
        let record = extract(
            "<collateraldetail><textcontent><x426>03</x426></textcontent>\
             </collateraldetail>",
        );
        assert_eq!(record.summary, None);
    }

    #[test]
    fn test_genre_split_on_slash() {
        let record = extract(
            "<descriptivedetail><subject>\
             <b070>Science / Marine Biology / Oceanography</b070>\
             </subject></descriptivedetail>",
        );
        assert_eq!(record.genre_main.as_deref(), Some("Science"));
        assert_eq!(record.subgenres, vec!["Marine Biology", "Oceanography"]);
    }

    #[test]
    fn test_genre_leading_slash_keeps_empty_main() {
        let record = extract(
            "<descriptivedetail><subject>\
             <b070>/ Marine Biology / Oceanography</b070>\
             </subject></descriptivedetail>",
        );
        assert_eq!(record.genre_main.as_deref(), Some(""));
        assert_eq!(record.subgenres, vec!["Marine Biology", "Oceanography"]);
    }

    #[test]
    fn test_genre_absent_without_heading() {
        let record = extract(
            "<descriptivedetail><subject><b067>10</b067><b069>JUV030</b069></subject>\
             </descriptivedetail>",
        );
        assert_eq!(record.genre_main, None);
        assert!(record.subgenres.is_empty());
    }

    #[test]
    fn test_nonfiction_classifier() {
        let record = extract(
            "<descriptivedetail><subject><b067>10</b067><b069>JNF026000</b069></subject>\
             </descriptivedetail>",
        );
        assert_eq!(record.kind, BookType::Nonfiction);

        let record = extract(
            "<descriptivedetail><subject><b067>10</b067><b069>JUV030000</b069></subject>\
             </descriptivedetail>",
        );
        assert_eq!(record.kind, BookType::Fiction);

        // scheme must be "10" for the code prefix to count
        let record = extract(
            "<descriptivedetail><subject><b067>20</b067><b069>JNF026000</b069></subject>\
             </descriptivedetail>",
        );
        assert_eq!(record.kind, BookType::Fiction);
    }

    #[test]
    fn test_bisac_categories_from_scheme_10() {
        let record = extract(
            "<descriptivedetail>\
             <subject><b067>10</b067><b069>JNF026000</b069></subject>\
             <subject><b067>10</b067><b069>ZZZ</b069></subject>\
             <subject><b067>20</b067><b069>JUV030</b069></subject>\
             </descriptivedetail>",
        );
        assert_eq!(record.bisac_categories, vec!["Educational", "Unknown Genre"]);
    }

    #[test]
    fn test_pages_from_extent_type_00() {
        let record = extract(
            "<descriptivedetail>\
             <extent><b218>11</b218><b219>480</b219></extent>\
             <extent><b218>00</b218><b219>320</b219></extent>\
             </descriptivedetail>",
        );
        assert_eq!(record.pages.as_deref(), Some("320"));
    }

    #[test]
    fn test_grade_range_both_sides() {
        let record = extract(
            "<descriptivedetail><audiencerange>\
             <b074>17</b074>\
             <b075>03</b075><b075>04</b075>\
             <b076>3</b076><b076>5</b076>\
             </audiencerange></descriptivedetail>",
        );
        assert_eq!(record.target_audience.as_deref(), Some("Grade 3-5"));
    }

    #[test]
    fn test_grade_range_omit_when_empty() {
        let record = extract(
            "<descriptivedetail><audiencerange><b074>17</b074></audiencerange>\
             </descriptivedetail>",
        );
        assert_eq!(record.target_audience, None);
    }

    #[test]
    fn test_grade_range_placeholder_sides() {
        let options = OnixOptions {
            grade_range: GradeRangeStyle::PlaceholderSides,
        };
        let record = extract_with(
            "<descriptivedetail><audiencerange>\
             <b074>17</b074><b075>03</b075><b076>3</b076>\
             </audiencerange></descriptivedetail>",
            &options,
        );
        assert_eq!(record.target_audience.as_deref(), Some("Grade 3-Unknown"));

        let record = extract_with(
            "<descriptivedetail><audiencerange><b074>17</b074></audiencerange>\
             </descriptivedetail>",
            &options,
        );
        assert_eq!(record.target_audience.as_deref(), Some("Grade Unknown-Unknown"));
    }

    #[test]
    fn test_grade_range_ignores_other_qualifiers() {
        let record = extract(
            "<descriptivedetail><audiencerange>\
             <b074>11</b074><b075>03</b075><b076>8</b076>\
             </audiencerange></descriptivedetail>",
        );
        assert_eq!(record.target_audience, None);
    }

    #[test]
    fn test_empty_product_yields_defaults() {
        let record = extract("<b001>rec-1</b001>");
        assert_eq!(record, OnixRecord::default());
    }
}
