use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use copo_cli::cli::{MatrixArgs, ReportArgs};
use copo_cli::edits::CellEdit;
use copo_engine::{ReportSession, ScorerKind};
use copo_ingest::{fingerprint, load_course_config};
use copo_model::{AttainmentKind, CourseInfo, OutcomeCode, ReportView, SourceFile};
use copo_report::{session_report, write_combined_csv, write_html_report, write_json_report};

use crate::summary::apply_table_style;

/// What a command leaves behind for printing.
pub struct RunOutcome {
    pub view: ReportView,
    pub written: Vec<PathBuf>,
    /// Message left by the last failing step, if any.
    pub message: Option<String>,
    /// Rejected edits and unreadable inputs.
    pub problems: Vec<String>,
}

impl RunOutcome {
    pub fn has_errors(&self) -> bool {
        self.message.is_some() || !self.problems.is_empty()
    }
}

pub fn run_codes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Code", "Matrix key"]);
    apply_table_style(&mut table);
    for code in OutcomeCode::all() {
        table.add_row(vec![
            (code.column() + 1).to_string(),
            code.label(),
            code.po_key(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_matrix(args: &MatrixArgs) -> Result<RunOutcome> {
    let span = info_span!("matrix", path = %args.mapping.display());
    let _guard = span.enter();
    let mut session = ReportSession::new();
    let mut problems = Vec::new();
    load_mapping(&mut session, &args.mapping, &mut problems);
    apply_edits(&mut session, &args.set, &mut problems);
    Ok(RunOutcome {
        view: session_report(&session, &CourseInfo::default()),
        written: Vec::new(),
        message: session.message().map(str::to_string),
        problems,
    })
}

pub fn run_report(args: &ReportArgs) -> Result<RunOutcome> {
    let span = info_span!("report", matrix = %args.matrix.display());
    let _guard = span.enter();

    let course = match &args.course {
        Some(path) => load_course_config(path)
            .with_context(|| format!("load course config {}", path.display()))?,
        None => CourseInfo::default(),
    };

    let mut session = ReportSession::new();
    let mut problems = Vec::new();
    load_mapping(&mut session, &args.matrix, &mut problems);
    apply_edits(&mut session, &args.set, &mut problems);

    let scorer = ScorerKind::from(args.scorer);
    let inputs = [
        (AttainmentKind::Direct, args.direct.as_deref()),
        (AttainmentKind::Indirect, args.indirect.as_deref()),
    ];
    for (kind, path) in inputs {
        let Some(path) = path else {
            continue;
        };
        if let Err(error) = session.calculate(kind, &scorer, path) {
            warn!(%kind, path = %path.display(), %error, "attainment not updated");
            problems.push(format!("{kind} attainment from {}: {error}", path.display()));
        }
    }

    let mut view = session_report(&session, &course);
    view.sources = sources(args);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.matrix));
    let mut written = Vec::new();
    if args.format.json() {
        let path = output_dir.join("report.json");
        write_json_report(&path, &view)?;
        written.push(path);
    }
    if args.format.html() {
        let path = output_dir.join("report.html");
        write_html_report(&path, &view)?;
        written.push(path);
    }
    if args.format.csv() && !view.combined.is_empty() {
        let path = output_dir.join("combined.csv");
        write_combined_csv(&path, &view.combined)?;
        written.push(path);
    }
    info!(files = written.len(), "report complete");

    Ok(RunOutcome {
        view,
        written,
        message: session.message().map(str::to_string),
        problems,
    })
}

fn load_mapping(session: &mut ReportSession, path: &Path, problems: &mut Vec<String>) {
    if let Err(error) = session.load_matrix_file(path) {
        problems.push(format!("mapping {}: {error}", path.display()));
    }
}

fn apply_edits(session: &mut ReportSession, edits: &[CellEdit], problems: &mut Vec<String>) {
    for edit in edits {
        if let Err(error) = session.edit_cell(edit.row, edit.col, edit.raw.as_str()) {
            problems.push(format!("edit {edit}: {error}"));
        }
    }
}

fn default_output_dir(matrix: &Path) -> PathBuf {
    matrix
        .parent()
        .map_or_else(|| PathBuf::from("output"), |dir| dir.join("output"))
}

fn sources(args: &ReportArgs) -> Vec<SourceFile> {
    let entries = [
        ("matrix", Some(&args.matrix)),
        ("direct", args.direct.as_ref()),
        ("indirect", args.indirect.as_ref()),
        ("course", args.course.as_ref()),
    ];
    entries
        .into_iter()
        .filter_map(|(role, path)| path.map(|path| (role, path)))
        .map(|(role, path)| SourceFile {
            role: role.to_string(),
            path: path.display().to_string(),
            sha256: fingerprint(path).ok(),
        })
        .collect()
}
