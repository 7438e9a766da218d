//! System identity and session providers

use super::{Context, Provider};
use crate::render::{InfoLine, RenderItem};
use crate::utils::{file, parsing};
use std::env;

/// Bold `user@host` heading
pub struct Title;

impl Provider for Title {
    fn labels(&self) -> Vec<&str> {
        Vec::new()
    }

    fn produce(&self, ctx: &Context) -> Vec<RenderItem> {
        let user = match env::var("USER").ok().filter(|u| !u.is_empty()) {
            Some(user) => user,
            None => return Vec::new(),
        };
        let host = match ctx
            .uname
            .as_ref()
            .map(|u| u.nodename.clone())
            .filter(|h| !h.is_empty())
        {
            Some(host) => host,
            None => return Vec::new(),
        };
        let p = ctx.palette;
        vec![RenderItem::Raw(format!(
            "{bold}{c3}{user}{reset}@{bold}{c3}{host}{reset}",
            bold = p.bold(),
            c3 = p.slot(3),
            reset = p.reset(),
            user = user,
            host = host,
        ))]
    }
}

/// Distro name and documentation URL from /etc/os-release
pub struct Os;

impl Provider for Os {
    fn labels(&self) -> Vec<&str> {
        vec!["os", "docs"]
    }

    fn produce(&self, ctx: &Context) -> Vec<RenderItem> {
        let os = match &ctx.os_release {
            Some(os) => os,
            None => return Vec::new(),
        };
        let mut items = Vec::new();
        if let Some(pretty) = os.get("PRETTY_NAME") {
            let name = match os.get("BUILD_ID") {
                Some(build) if !pretty.contains(build) => format!("{} ({})", pretty, build),
                _ => pretty.to_string(),
            };
            items.push(RenderItem::Line(InfoLine::new("os", name)));
        }
        if let Some(url) = os.get("HOME_URL") {
            items.push(RenderItem::Line(InfoLine::new("docs", url.to_string())));
        }
        items
    }
}

/// Hostname, falling back to the machine architecture
pub struct Host;

impl Provider for Host {
    fn labels(&self) -> Vec<&str> {
        vec!["host"]
    }

    fn produce(&self, ctx: &Context) -> Vec<RenderItem> {
        let uname = match &ctx.uname {
            Some(uname) => uname,
            None => return Vec::new(),
        };
        let value = if !uname.nodename.is_empty() {
            uname.nodename.clone()
        } else if !uname.machine.is_empty() {
            uname.machine.clone()
        } else {
            return Vec::new();
        };
        vec![RenderItem::Line(InfoLine::new("host", value))]
    }
}

/// Kernel release from the cached uname
pub struct Kernel;

impl Provider for Kernel {
    fn labels(&self) -> Vec<&str> {
        vec!["kernel"]
    }

    fn produce(&self, ctx: &Context) -> Vec<RenderItem> {
        match &ctx.uname {
            Some(uname) if !uname.release.is_empty() => vec![RenderItem::Line(
                InfoLine::new("kernel", uname.release.clone()),
            )],
            _ => Vec::new(),
        }
    }
}

/// Uptime from /proc/uptime, formatted as days/hours/minutes
pub struct Uptime;

impl Provider for Uptime {
    fn labels(&self) -> Vec<&str> {
        vec!["uptime"]
    }

    fn produce(&self, _ctx: &Context) -> Vec<RenderItem> {
        let line = match file::read_first_line("/proc/uptime") {
            Ok(line) => line,
            Err(_) => return Vec::new(),
        };
        match parsing::parse_uptime(&line) {
            Some(secs) => vec![RenderItem::Line(InfoLine::new(
                "uptime",
                parsing::format_uptime(secs),
            ))],
            None => Vec::new(),
        }
    }
}

/// Login shell basename from $SHELL
pub struct Shell;

impl Provider for Shell {
    fn labels(&self) -> Vec<&str> {
        vec!["shell"]
    }

    fn produce(&self, _ctx: &Context) -> Vec<RenderItem> {
        match env::var("SHELL").ok().filter(|s| !s.is_empty()) {
            Some(shell) => vec![RenderItem::Line(InfoLine::new(
                "shell",
                parsing::basename(&shell).to_string(),
            ))],
            None => Vec::new(),
        }
    }
}

/// Editor basename, $VISUAL before $EDITOR
pub struct Editor;

impl Provider for Editor {
    fn labels(&self) -> Vec<&str> {
        vec!["editor"]
    }

    fn produce(&self, _ctx: &Context) -> Vec<RenderItem> {
        let editor = env::var("VISUAL")
            .ok()
            .filter(|e| !e.is_empty())
            .or_else(|| env::var("EDITOR").ok().filter(|e| !e.is_empty()));
        match editor {
            Some(editor) => vec![RenderItem::Line(InfoLine::new(
                "editor",
                parsing::basename(&editor).to_string(),
            ))],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::Fixture;
    use super::*;
    use crate::data::{OsRelease, Uname};

    #[test]
    fn test_os_emits_distro_and_docs_lines() {
        let fixture = Fixture::plain();
        let mut ctx = fixture.context();
        ctx.os_release = Some(OsRelease::parse(
            "PRETTY_NAME=\"Arch Linux\"\nBUILD_ID=rolling\nHOME_URL=\"https://archlinux.org/\"\n",
        ));
        let items = Os.produce(&ctx);
        assert_eq!(items.len(), 2);
        match &items[0] {
            RenderItem::Line(line) => {
                assert_eq!(line.label, "os");
                assert_eq!(line.value, "Arch Linux (rolling)");
            }
            other => panic!("unexpected item: {:?}", other),
        }
        match &items[1] {
            RenderItem::Line(line) => {
                assert_eq!(line.label, "docs");
                assert_eq!(line.value, "https://archlinux.org/");
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn test_os_without_source_emits_nothing() {
        let fixture = Fixture::plain();
        let ctx = fixture.context();
        assert!(Os.produce(&ctx).is_empty());
    }

    #[test]
    fn test_os_skips_absent_keys() {
        let fixture = Fixture::plain();
        let mut ctx = fixture.context();
        ctx.os_release = Some(OsRelease::parse("PRETTY_NAME=\"Debian GNU/Linux 12\"\n"));
        let items = Os.produce(&ctx);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_host_prefers_nodename_over_machine() {
        let fixture = Fixture::plain();
        let mut ctx = fixture.context();
        ctx.uname = Some(Uname {
            release: "6.9.1".to_string(),
            machine: "x86_64".to_string(),
            nodename: "shed".to_string(),
        });
        match &Host.produce(&ctx)[0] {
            RenderItem::Line(line) => assert_eq!(line.value, "shed"),
            other => panic!("unexpected item: {:?}", other),
        }

        ctx.uname.as_mut().unwrap().nodename.clear();
        match &Host.produce(&ctx)[0] {
            RenderItem::Line(line) => assert_eq!(line.value, "x86_64"),
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn test_kernel_uses_cached_release() {
        let fixture = Fixture::plain();
        let mut ctx = fixture.context();
        ctx.uname = Some(Uname {
            release: "6.9.1-arch1-1".to_string(),
            machine: "x86_64".to_string(),
            nodename: "shed".to_string(),
        });
        match &Kernel.produce(&ctx)[0] {
            RenderItem::Line(line) => assert_eq!(line.value, "6.9.1-arch1-1"),
            other => panic!("unexpected item: {:?}", other),
        }
        assert!(Kernel.produce(&fixture.context()).is_empty());
    }

    #[test]
    fn test_title_without_host_emits_nothing() {
        let fixture = Fixture::plain();
        // no uname in the context, whatever $USER says
        assert!(Title.produce(&fixture.context()).is_empty());
    }
}
