use std::io::{self, Write};

use crate::types::{OutputMode, ResourceSummary};

/// Print `items` to stdout. A closed stdout ends output without an error.
pub fn emit(mode: OutputMode, heading: &str, items: &[ResourceSummary]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match write_summaries(&mut out, mode, heading, items).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub fn write_summaries<W: Write>(
    out: &mut W,
    mode: OutputMode,
    heading: &str,
    items: &[ResourceSummary],
) -> io::Result<()> {
    for item in items {
        match mode {
            OutputMode::Human => {
                writeln!(out, "{heading}: {}", item.name)?;
            }
            OutputMode::Json => {
                serde_json::to_writer(&mut *out, item).map_err(io::Error::other)?;
                out.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ResourceSummary> {
        ["builder", "default"]
            .into_iter()
            .map(|name| ResourceSummary {
                cluster: "default".to_string(),
                kind: "ServiceAccount".to_string(),
                namespace: "default".to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn human_lines_keep_order() {
        let mut buf = Vec::new();
        write_summaries(
            &mut buf,
            OutputMode::Human,
            "External Cluster Service Account Name",
            &items(),
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "External Cluster Service Account Name: builder\n\
             External Cluster Service Account Name: default\n"
        );
    }

    #[test]
    fn json_mode_is_ndjson() {
        let mut buf = Vec::new();
        write_summaries(&mut buf, OutputMode::Json, "ignored", &items()).unwrap();

        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            for k in ["cluster", "kind", "namespace", "name"] {
                assert!(v.get(k).is_some(), "missing key {k} in {v}");
            }
        }
    }
}
