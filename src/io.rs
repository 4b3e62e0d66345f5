use crate::calendar;
use crate::model::{OffRequest, Schedule, ShiftKind, Worker};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = "\u{feff}".as_bytes();
/// Libellé de la première colonne de la grille exportée.
pub const GRID_HEADER: &str = "従業員";

/// Import des souhaits de repos depuis CSV: header `ID,Name,Date[,Priority]`
pub fn import_requests_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
    read_requests(file)
}

/// Lit les lignes de souhaits et regroupe par ID (ordre de première apparition).
/// Les lignes invalides sont ignorées avec un avertissement.
pub fn read_requests<R: Read>(reader: R) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = RequestColumns::from_headers(rdr.headers()?)?;

    let mut workers: Vec<Worker> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows = 0usize;
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        rows += 1;
        let field = |idx: usize| rec.get(idx).map(str::trim).unwrap_or("");
        let (id, name, raw_date) = (field(columns.id), field(columns.name), field(columns.date));
        if id.is_empty() || name.is_empty() {
            tracing::warn!(row = line + 1, "skipping request row: missing ID or Name");
            continue;
        }
        let Some(date) = calendar::parse_date(raw_date) else {
            tracing::warn!(row = line + 1, date = raw_date, "skipping request row: invalid date");
            continue;
        };
        let priority = columns.priority.is_some_and(|idx| parse_bool(field(idx)));

        let pos = *index.entry(id.to_string()).or_insert_with(|| {
            workers.push(Worker::new(id, name));
            workers.len() - 1
        });
        workers[pos].requests.push(OffRequest { date, priority });
    }

    if rows == 0 {
        bail!("request CSV contains a header but no data rows");
    }
    if workers.is_empty() {
        bail!("request CSV contains no valid worker row");
    }
    Ok(workers)
}

struct RequestColumns {
    id: usize,
    name: usize,
    date: usize,
    priority: Option<usize>,
}

impl RequestColumns {
    fn from_headers(headers: &StringRecord) -> anyhow::Result<Self> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(wanted))
        };
        match (find("id"), find("name"), find("date")) {
            (Some(id), Some(name), Some(date)) => Ok(Self {
                id,
                name,
                date,
                priority: find("priority"),
            }),
            _ => bail!("invalid CSV header: ID, Name and Date columns are required"),
        }
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Grille TSV (BOM UTF-8) : `従業員` puis jours 1..N ; une ligne par membre.
pub fn write_schedule_tsv<W: Write>(
    mut out: W,
    schedule: &Schedule,
    workers: &[Worker],
) -> anyhow::Result<()> {
    out.write_all(UTF8_BOM)?;
    let mut w = WriterBuilder::new().delimiter(b'\t').from_writer(out);

    let mut buf = itoa::Buffer::new();
    let mut header = vec![GRID_HEADER.to_string()];
    header.extend((1..=schedule.days.len()).map(|day| buf.format(day).to_string()));
    w.write_record(&header)?;

    for worker in workers {
        let row = schedule.row(&worker.id);
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(worker.name.as_str());
        record.extend(row.iter().map(|kind| kind.code()));
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_tsv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    workers: &[Worker],
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_schedule_tsv(BufWriter::new(file), schedule, workers)
}

/// Ligne relue depuis une grille exportée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub name: String,
    pub shifts: Vec<ShiftKind>,
}

/// Relit une grille produite par [`write_schedule_tsv`].
pub fn read_schedule_tsv<R: Read>(mut reader: R) -> anyhow::Result<Vec<GridRow>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let body = data.strip_prefix(UTF8_BOM).unwrap_or(&data[..]);

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(body);
    let days = rdr.headers()?.len().saturating_sub(1);

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing worker name")?.to_string();
        let shifts = rec
            .iter()
            .skip(1)
            .map(|code| {
                ShiftKind::from_code(code)
                    .with_context(|| format!("unknown shift code {code:?} for {name}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        if shifts.len() != days {
            bail!("row for {name} has {} day(s), expected {days}", shifts.len());
        }
        rows.push(GridRow { name, shifts });
    }
    Ok(rows)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

pub fn load_schedule_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Schedule> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let schedule = serde_json::from_slice(&data)
        .with_context(|| format!("parsing schedule {}", path.display()))?;
    Ok(schedule)
}
