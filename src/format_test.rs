use super::*;

fn items(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================
// Inline emphasis
// =============================================================

#[test]
fn bold_and_italic_in_one_paragraph() {
    let blocks = format("**a** and *b*");
    assert_eq!(blocks, vec![BlockElement::Paragraph("<strong>a</strong> and <em>b</em>".into())]);
}

#[test]
fn emphasis_does_not_cross_lines() {
    let blocks = format("*open\nclose*");
    assert_eq!(
        blocks,
        vec![BlockElement::Paragraph("*open".into()), BlockElement::Paragraph("close*".into())]
    );
}

#[test]
fn emphasis_applies_inside_list_items() {
    let blocks = format("- take **with food**\n- avoid *alcohol*");
    assert_eq!(
        blocks,
        vec![BlockElement::UnorderedList(items(&["take <strong>with food</strong>", "avoid <em>alcohol</em>"]))]
    );
}

// =============================================================
// Lists
// =============================================================

#[test]
fn bullets_merge_into_one_list() {
    assert_eq!(format("- x\n- y"), vec![BlockElement::UnorderedList(items(&["x", "y"]))]);
}

#[test]
fn numbered_lines_form_ordered_list() {
    assert_eq!(format("1. x\n2. y"), vec![BlockElement::OrderedList(items(&["x", "y"]))]);
}

#[test]
fn blank_line_splits_list_with_spacer() {
    assert_eq!(
        format("- x\n\n- y"),
        vec![
            BlockElement::UnorderedList(items(&["x"])),
            BlockElement::Spacer,
            BlockElement::UnorderedList(items(&["y"])),
        ]
    );
}

#[test]
fn kind_switch_closes_and_reopens() {
    assert_eq!(
        format("- x\n1. y"),
        vec![BlockElement::UnorderedList(items(&["x"])), BlockElement::OrderedList(items(&["y"]))]
    );
}

#[test]
fn paragraph_closes_open_list() {
    assert_eq!(
        format("Watch for:\n- nausea\n- rash\nCall your doctor."),
        vec![
            BlockElement::Paragraph("Watch for:".into()),
            BlockElement::UnorderedList(items(&["nausea", "rash"])),
            BlockElement::Paragraph("Call your doctor.".into()),
        ]
    );
}

#[test]
fn indented_dash_is_a_paragraph() {
    assert_eq!(format("  - not a list"), vec![BlockElement::Paragraph("- not a list".into())]);
}

#[test]
fn decimal_dose_is_not_a_list_item() {
    assert_eq!(format("1.5 mg daily"), vec![BlockElement::Paragraph("1.5 mg daily".into())]);
}

// =============================================================
// Line handling
// =============================================================

#[test]
fn crlf_lines_are_handled() {
    assert_eq!(format("- x\r\n- y\r\n"), vec![BlockElement::UnorderedList(items(&["x", "y"])), BlockElement::Spacer]);
}

#[test]
fn every_blank_line_is_a_spacer() {
    assert_eq!(
        format("a\n\n\nb"),
        vec![
            BlockElement::Paragraph("a".into()),
            BlockElement::Spacer,
            BlockElement::Spacer,
            BlockElement::Paragraph("b".into()),
        ]
    );
}

#[test]
fn paragraphs_are_trimmed() {
    assert_eq!(format("   Take it for 7 days.  "), vec![BlockElement::Paragraph("Take it for 7 days.".into())]);
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_html_emits_trusted_markup() {
    let html = render_html(&format("**Note**\n\n1. one\n2. two"));
    assert_eq!(
        html,
        "<p><strong>Note</strong></p><div class=\"spacer\"></div><ol><li>one</li><li>two</li></ol>"
    );
}

#[test]
fn render_text_strips_emphasis() {
    let text = render_text(&format("**Tip**\n- drink *water*\n1. rest"));
    assert_eq!(text, "Tip\n  • drink water\n  1. rest");
}
