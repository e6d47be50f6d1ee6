//! Printable XHTML report.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use copo_model::{AttainmentKind, AttainmentSection, CourseOutcome, ReportView};

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
const ATTAINMENT_SERIES_LABEL: &str = "PO Attainment";

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; margin-bottom: 1.5em; }
th, td { border: 1px solid #999; padding: 4px 8px; }
td.num { text-align: right; }
tr.footer { font-weight: bold; background: #f0f0f0; }
@media print { section { page-break-inside: avoid; } }";

/// Writes the rounded report as a standalone XHTML page.
pub fn write_html_report(output_path: &Path, view: &ReportView) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let file = File::create(output_path)
        .with_context(|| format!("create {}", output_path.display()))?;
    let mut xml = Writer::new_with_indent(BufWriter::new(file), b' ', 2);
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    render(&mut xml, &view.rounded(), &timestamp)?;
    xml.into_inner()
        .flush()
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(path = %output_path.display(), "wrote HTML report");
    Ok(())
}

/// Renders an already rounded view.
pub fn render_html(view: &ReportView, generated_at: &str) -> Result<String> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    render(&mut xml, view, generated_at)?;
    String::from_utf8(xml.into_inner()).context("HTML output is not UTF-8")
}

fn render<W: Write>(xml: &mut Writer<W>, view: &ReportView, generated_at: &str) -> Result<()> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut html = BytesStart::new("html");
    html.push_attribute(("xmlns", XHTML_NS));
    xml.write_event(Event::Start(html))?;

    xml.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "UTF-8"));
    xml.write_event(Event::Empty(meta))?;
    write_text_element(xml, "title", &title(view))?;
    write_text_element(xml, "style", STYLE)?;
    xml.write_event(Event::End(BytesEnd::new("head")))?;

    xml.write_event(Event::Start(BytesStart::new("body")))?;
    write_text_element(xml, "h1", &title(view))?;
    write_course(xml, view)?;
    write_text_element(xml, "p", &format!("Generated {generated_at}"))?;
    write_mapping(xml, view)?;
    for section in [&view.direct, &view.indirect].into_iter().flatten() {
        write_section(xml, section)?;
    }
    if !view.combined.is_empty() {
        let rows: Vec<Vec<String>> = view
            .combined
            .iter()
            .map(|value| {
                vec![
                    value.code.label(),
                    format!("{:.2}", value.direct80),
                    format!("{:.2}", value.indirect20),
                    format!("{:.2}", value.final_value),
                ]
            })
            .collect();
        open_section(xml, "Final PO/PSO Attainment")?;
        write_table(
            xml,
            &["PO/PSO", "Direct (80%)", "Indirect (20%)", "Final"],
            &rows,
            None,
        )?;
        close_section(xml)?;
    }
    xml.write_event(Event::End(BytesEnd::new("body")))?;
    xml.write_event(Event::End(BytesEnd::new("html")))?;
    Ok(())
}

fn title(view: &ReportView) -> String {
    match view.course.subject.as_deref() {
        Some(subject) => format!("CO-PO-PSO Attainment Report: {subject}"),
        None => "CO-PO-PSO Attainment Report".to_string(),
    }
}

fn write_course<W: Write>(xml: &mut Writer<W>, view: &ReportView) -> Result<()> {
    let fields = view.course.header_fields();
    if !fields.is_empty() {
        let rows: Vec<Vec<String>> = fields
            .iter()
            .map(|(label, value)| vec![(*label).to_string(), (*value).to_string()])
            .collect();
        write_table(xml, &[], &rows, None)?;
    }
    if view.course.outcomes.is_empty() {
        return Ok(());
    }
    open_section(xml, "Course Outcomes")?;
    let rows: Vec<Vec<String>> = CourseOutcome::all()
        .filter_map(|co| {
            view.course
                .outcome_statement(co)
                .map(|statement| vec![co.label(), statement.to_string()])
        })
        .collect();
    write_table(xml, &["CO", "Statement"], &rows, None)?;
    close_section(xml)
}

fn write_mapping<W: Write>(xml: &mut Writer<W>, view: &ReportView) -> Result<()> {
    let mapping = &view.mapping;
    let mut header = vec!["CO/PO"];
    header.extend(mapping.columns.iter().map(String::as_str));
    let rows: Vec<Vec<String>> = mapping
        .rows
        .iter()
        .chain(std::iter::once(&mapping.footer))
        .map(|row| {
            std::iter::once(row.label.clone())
                .chain(row.values.iter().map(|value| format!("{value:.2}")))
                .collect()
        })
        .collect();
    open_section(xml, "CO-PO-PSO Mapping")?;
    write_table(xml, &header, &rows, Some(mapping.rows.len()))?;
    close_section(xml)
}

fn write_section<W: Write>(xml: &mut Writer<W>, section: &AttainmentSection) -> Result<()> {
    let heading = match section.kind {
        AttainmentKind::Direct => "Direct Attainment",
        AttainmentKind::Indirect => "Indirect Attainment",
    };
    open_section(xml, heading)?;

    let co_rows: Vec<Vec<String>> = section
        .co_series
        .iter()
        .map(|point| vec![point.label.clone(), format!("{:.2}", point.value)])
        .collect();
    write_table(xml, &["CO", "Attainment"], &co_rows, None)?;

    let weight_header = format!("x{}", section.kind.weight());
    let po_rows: Vec<Vec<String>> = section
        .po_series
        .iter()
        .zip(&section.weighted_series)
        .map(|(point, weighted)| {
            vec![
                point.label.clone(),
                format!("{:.2}", point.value),
                format!("{:.2}", weighted.value),
            ]
        })
        .collect();
    write_table(
        xml,
        &["PO/PSO", "Attainment", weight_header.as_str()],
        &po_rows,
        None,
    )?;

    let comparison_rows: Vec<Vec<String>> = section
        .comparison
        .iter()
        .map(|point| {
            vec![
                point.code.label(),
                format!("{:.2}", point.mapping),
                format!("{:.2}", point.attainment),
            ]
        })
        .collect();
    write_table(
        xml,
        &[
            "PO/PSO",
            section.comparison_label.as_str(),
            ATTAINMENT_SERIES_LABEL,
        ],
        &comparison_rows,
        None,
    )?;
    close_section(xml)
}

fn open_section<W: Write>(xml: &mut Writer<W>, heading: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("section")))?;
    write_text_element(xml, "h2", heading)
}

fn close_section<W: Write>(xml: &mut Writer<W>) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new("section")))?;
    Ok(())
}

/// Writes a table. The row at `footer_index`, if any, gets the footer class.
/// Cells after the first are numeric and right-aligned.
fn write_table<W: Write>(
    xml: &mut Writer<W>,
    header: &[&str],
    rows: &[Vec<String>],
    footer_index: Option<usize>,
) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("table")))?;
    if !header.is_empty() {
        xml.write_event(Event::Start(BytesStart::new("thead")))?;
        xml.write_event(Event::Start(BytesStart::new("tr")))?;
        for name in header {
            write_text_element(xml, "th", name)?;
        }
        xml.write_event(Event::End(BytesEnd::new("tr")))?;
        xml.write_event(Event::End(BytesEnd::new("thead")))?;
    }
    xml.write_event(Event::Start(BytesStart::new("tbody")))?;
    for (index, row) in rows.iter().enumerate() {
        let mut tr = BytesStart::new("tr");
        if footer_index == Some(index) {
            tr.push_attribute(("class", "footer"));
        }
        xml.write_event(Event::Start(tr))?;
        for (col, cell) in row.iter().enumerate() {
            if col == 0 || header.is_empty() {
                write_text_element(xml, "td", cell)?;
            } else {
                let mut td = BytesStart::new("td");
                td.push_attribute(("class", "num"));
                xml.write_event(Event::Start(td))?;
                xml.write_event(Event::Text(BytesText::new(cell)))?;
                xml.write_event(Event::End(BytesEnd::new("td")))?;
            }
        }
        xml.write_event(Event::End(BytesEnd::new("tr")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("tbody")))?;
    xml.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
