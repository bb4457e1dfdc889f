//! Unix foreground process snapshots
//!
//! The foreground of a terminal is its foreground process group: every
//! process whose group id equals the terminal's `tpgid`. Linux reads this
//! from `/proc`; other unix systems ask `ps`.
//!
//! Members are listed oldest first, so a wrapper such as `kitten ssh` comes
//! before the `ssh` it spawned into the same group.

use crate::error::{Error, Result};
use crate::models::ProcessDescriptor;
use crate::platform::traits::ProcessOps;
#[cfg(target_os = "linux")]
use std::fs;

pub struct UnixProcessTable;

impl UnixProcessTable {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnixProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessOps for UnixProcessTable {
    fn foreground_processes(&self, shell_pid: u32) -> Result<Vec<ProcessDescriptor>> {
        #[cfg(target_os = "linux")]
        {
            self.foreground_linux(shell_pid)
        }

        #[cfg(not(target_os = "linux"))]
        {
            self.foreground_ps(shell_pid)
        }
    }
}

/// The `/proc/<pid>/stat` fields the snapshot needs
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
struct StatFields {
    comm: String,
    pgrp: i64,
    tpgid: i64,
    start_time: u64,
}

/// One row of `ps -A -o pid=,pgid=,tpgid=,args=`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(target_os = "linux", allow(dead_code))]
struct PsRow {
    pid: u32,
    pgid: i64,
    tpgid: i64,
    argv: Vec<String>,
}

impl UnixProcessTable {
    /// Snapshot the foreground group via `/proc`
    #[cfg(target_os = "linux")]
    fn foreground_linux(&self, shell_pid: u32) -> Result<Vec<ProcessDescriptor>> {
        let shell_stat = fs::read_to_string(format!("/proc/{}/stat", shell_pid))
            .map_err(|_| Error::ProcessNotFound { pid: shell_pid })?;
        let shell = parse_stat(&shell_stat).ok_or_else(|| Error::ProcessSnapshotFailed {
            pid: shell_pid,
            reason: "malformed stat file".to_string(),
        })?;

        if shell.tpgid <= 0 {
            debug!("Process {} has no controlling terminal", shell_pid);
            return Ok(Vec::new());
        }

        let proc_dir = fs::read_dir("/proc").map_err(|e| Error::ProcessSnapshotFailed {
            pid: shell_pid,
            reason: e.to_string(),
        })?;

        let mut members = Vec::new();
        for entry in proc_dir.flatten() {
            let Some(pid) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<u32>().ok())
            else {
                continue;
            };

            // Processes may exit between listing and reading
            let Ok(stat_content) = fs::read_to_string(format!("/proc/{}/stat", pid)) else {
                continue;
            };
            let Some(stat) = parse_stat(&stat_content) else {
                continue;
            };
            if stat.pgrp != shell.tpgid {
                continue;
            }

            let argv = fs::read(format!("/proc/{}/cmdline", pid))
                .map(|raw| split_cmdline(&raw))
                .unwrap_or_default();
            members.push((stat.start_time, ProcessDescriptor::new(pid, stat.comm, argv)));
        }

        members.sort_by(|(a_start, a), (b_start, b)| {
            a_start.cmp(b_start).then_with(|| a.pid.cmp(&b.pid))
        });

        trace!(
            "Foreground group {} of pid {} has {} member(s)",
            shell.tpgid,
            shell_pid,
            members.len()
        );
        Ok(members.into_iter().map(|(_, process)| process).collect())
    }

    /// Snapshot the foreground group via `ps`
    #[cfg(not(target_os = "linux"))]
    fn foreground_ps(&self, shell_pid: u32) -> Result<Vec<ProcessDescriptor>> {
        use std::process::Command;

        let output = Command::new("ps")
            .args(["-A", "-o", "pid=,pgid=,tpgid=,args="])
            .output()
            .map_err(|e| Error::ProcessSnapshotFailed {
                pid: shell_pid,
                reason: format!("failed to run ps: {}", e),
            })?;

        if !output.status.success() {
            return Err(Error::ProcessSnapshotFailed {
                pid: shell_pid,
                reason: "ps command failed".to_string(),
            });
        }

        let rows = parse_ps_output(&String::from_utf8_lossy(&output.stdout));
        select_foreground(rows, shell_pid)
    }
}

/// Parse `/proc/<pid>/stat`
///
/// The command name sits in parentheses and may itself contain spaces or
/// parentheses, so it runs from the first `(` to the last `)`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_stat(content: &str) -> Option<StatFields> {
    let open = content.find('(')?;
    let close = content.rfind(')')?;
    if close < open {
        return None;
    }

    let comm = content[open + 1..close].to_string();
    let fields: Vec<&str> = content[close + 1..].split_whitespace().collect();

    // After the command: state ppid pgrp session tty_nr tpgid ... starttime
    Some(StatFields {
        comm,
        pgrp: fields.get(2)?.parse().ok()?,
        tpgid: fields.get(5)?.parse().ok()?,
        start_time: fields.get(19)?.parse().ok()?,
    })
}

/// Split a NUL-separated `/proc/<pid>/cmdline`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn split_cmdline(raw: &[u8]) -> Vec<String> {
    raw.split(|byte| *byte == 0)
        .filter(|arg| !arg.is_empty())
        .map(|arg| String::from_utf8_lossy(arg).into_owned())
        .collect()
}

#[cfg_attr(target_os = "linux", allow(dead_code))]
fn parse_ps_output(output: &str) -> Vec<PsRow> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let pid = parts.next()?.parse().ok()?;
            let pgid = parts.next()?.parse().ok()?;
            let tpgid = parts.next()?.parse().ok()?;
            Some(PsRow {
                pid,
                pgid,
                tpgid,
                argv: parts.map(str::to_string).collect(),
            })
        })
        .collect()
}

/// Keep the shell's foreground group, oldest (lowest pid) first
#[cfg_attr(target_os = "linux", allow(dead_code))]
fn select_foreground(rows: Vec<PsRow>, shell_pid: u32) -> Result<Vec<ProcessDescriptor>> {
    let shell = rows
        .iter()
        .find(|row| row.pid == shell_pid)
        .ok_or(Error::ProcessNotFound { pid: shell_pid })?;

    let tpgid = shell.tpgid;
    if tpgid <= 0 {
        return Ok(Vec::new());
    }

    let mut members: Vec<ProcessDescriptor> = rows
        .into_iter()
        .filter(|row| row.pgid == tpgid)
        .map(|row| {
            let name = row.argv.first().cloned().unwrap_or_default();
            ProcessDescriptor::new(row.pid, name, row.argv)
        })
        .collect();
    members.sort_by_key(|process| process.pid);
    Ok(members)
}
