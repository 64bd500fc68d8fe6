//! ONIX code tables.
//!
//! Pure lookups from short domain codes to human labels. Unknown input is
//! never an error: the raw code passes through as the label.

/// Contributor role code (ONIX list 17) to role label.
pub fn contributor_role(code: &str) -> &str {
    match role_label(code) {
        Some(label) => label,
        None => {
            tracing::debug!(code, "unrecognized contributor role code");
            code
        }
    }
}

fn role_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "A01" => "Author",
        "A02" => "Co-author",
        "A07" => "Editor",
        "A12" => "Illustrator",
        "A13" => "Photographer",
        "A38" => "Original Author",
        "B01" => "Translator",
        _ => return None,
    };
    Some(label)
}

/// Product form code (ONIX list 150) to form label.
pub fn product_form(code: &str) -> &str {
    match form_label(code) {
        Some(label) => label,
        None => {
            tracing::debug!(code, "unrecognized product form code");
            code
        }
    }
}

fn form_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "AA" => "Audio",
        "AC" => "Audio CD",
        "BA" => "Book",
        "BB" => "Hardback",
        "BC" => "Paperback Book",
        "BD" => "Book and DVD package",
        "BE" => "Book and CD package",
        "BH" => "Leather / fine binding",
        "BI" => "Book Illustrated",
        "BJ" => "Book and Audio package",
        "BK" => "Book and Disk package",
        "BL" => "Book and CD-ROM package",
        "BM" => "Book and Cassette package",
        "BP" => "Plastic / vinyl bound book",
        "BZ" => "Other book format",
        "CA" => "Sheet map",
        "CB" => "Sheet map folded",
        "CD" => "Digital Audio",
        "DA" => "Digital content",
        "DB" => "Digital textbook",
        "DC" => "Digital container format",
        "DD" => "Digital document",
        "DE" => "Digital edition",
        "DF" => "Digital format",
        "DG" => "Electronic Book",
        "LB" => "Library binding",
        "PB" => "Paperback",
        "TH" => "Thesis",
        "VA" => "Video",
        "VF" => "DVD Video",
        "VI" => "DVD Interactive",
        "VJ" => "VHS PAL",
        "VZ" => "VOD",
        _ => return None,
    };
    Some(label)
}

/// BISAC subject code to category label by longest-prefix match.
pub fn bisac_category(code: &str) -> &'static str {
    for end in (1..=code.len()).rev() {
        if !code.is_char_boundary(end) {
            continue;
        }
        if let Some(label) = bisac_label(&code[..end]) {
            return label;
        }
    }
    "Unknown Genre"
}

fn bisac_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "JNF003" => "Animals/Pets",
        "JNF026" => "Educational",
        "JUV030" => "Fiction",
        "JNF" => "Nonfiction",
        "JUV" => "Juvenile Fiction",
        _ => return None,
    };
    Some(label)
}
