use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use leavecal::calc::{DisplayEvent, add_days, expand, parse_iso};
use leavecal::data::{EventData, Persistable};

const DEFAULT_SPAN_DAYS: i64 = 30;

pub fn run(from: Option<&str>, to: Option<&str>) -> Result<()> {
    let from = match from {
        Some(s) => parse_iso(s).context("invalid --from date")?,
        None => Local::now().date_naive(),
    };
    let to = match to {
        Some(s) => parse_iso(s).context("invalid --to date")?,
        None => add_days(from, DEFAULT_SPAN_DAYS).context("--from is too close to the end of time")?,
    };
    if to < from {
        bail!("--to ({to}) is before --from ({from})");
    }
    let event_data = EventData::load()?;
    write_events(&event_data, from, to, &mut std::io::stdout())
}

pub(crate) fn write_events<W: std::io::Write>(
    data: &EventData,
    from: NaiveDate,
    to: NaiveDate,
    out: &mut W,
) -> Result<()> {
    let mut days: Vec<DisplayEvent> = expand(&data.between(from, to))
        .into_iter()
        .filter(|e| e.display_date >= from && e.display_date <= to)
        .collect();
    days.sort_by_key(|e| (e.display_date, !e.event.is_all_day, e.event.start_time));

    writeln!(out, "Events [{} - {}]", from.format("%Y-%m-%d"), to.format("%Y-%m-%d"))?;
    writeln!(out, "---")?;
    for e in &days {
        writeln!(
            out,
            "  {} {}  {:<13} {}{}",
            e.display_date.format("%Y-%m-%d"),
            e.display_date.format("%a"),
            time_label(e),
            e.event.title,
            span_marker(e)
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} day entr(ies)", days.len())?;
    Ok(())
}

fn time_label(e: &DisplayEvent) -> String {
    match (e.event.is_all_day, e.event.start_time, e.event.end_time) {
        (false, Some(s), Some(end)) => format!("{}-{}", s.format("%H:%M"), end.format("%H:%M")),
        (false, Some(s), None) => s.format("%H:%M").to_string(),
        _ => "all day".to_string(),
    }
}

fn span_marker(e: &DisplayEvent) -> &'static str {
    match (e.is_multi_day, e.is_first_day, e.is_last_day) {
        (false, _, _) => "",
        (true, true, _) => " (starts)",
        (true, _, true) => " (ends)",
        (true, false, false) => " (cont.)",
    }
}
