//! The Node.js capture script plus the checks and error mapping around it.

use crate::{Result, WfaError};
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Capture script: DOM with computed styles, head metadata, stylesheet scan
/// and an optional base64 PNG of the viewport.
///
/// Arguments: url, width, height, navTimeoutMs, idleTimeoutMs, screenshotFlag, headlessFlag, maxNodes.
pub(crate) const PLAYWRIGHT_CAPTURE_SCRIPT: &str = r#"
const [, url, width, height, navTimeout, idleTimeout, screenshotFlag, headlessFlag, maxNodes] = process.argv;

async function run() {
  let browser;
  try {
    const { chromium } = require('playwright');
    browser = await chromium.launch({ headless: headlessFlag !== '0' });
    const context = await browser.newContext({
      viewport: {
        width: parseInt(width, 10),
        height: parseInt(height, 10)
      }
    });
    const page = await context.newPage();
    const navMs = parseInt(navTimeout, 10);
    const idleMs = parseInt(idleTimeout, 10);

    await page.goto(url, { waitUntil: 'domcontentloaded', timeout: navMs });
    try {
      await page.waitForLoadState('networkidle', { timeout: idleMs });
    } catch (_) {
      // Long-polling pages never go idle; capture what has rendered.
    }

    let screenshot = null;
    if (screenshotFlag === '1') {
      const buffer = await page.screenshot({ type: 'png', fullPage: false });
      screenshot = buffer.toString('base64');
    }

    const dom = await page.evaluate((limit) => {
      const nodes = [];
      let nodeId = 0;
      const skip = new Set(['script', 'style', 'noscript', 'template', 'meta', 'link', 'head']);

      function styleInfo(el) {
        const s = window.getComputedStyle(el);
        return {
          fontFamily: s.fontFamily || null,
          fontSize: parseFloat(s.fontSize) || null,
          fontWeight: s.fontWeight || null,
          lineHeight: parseFloat(s.lineHeight) || null,
          color: s.color || null,
          backgroundColor: s.backgroundColor || null,
          backgroundImage: s.backgroundImage || null,
          backgroundAttachment: s.backgroundAttachment || null,
          display: s.display || null,
          visibility: s.visibility || null,
          opacity: s.opacity !== '' ? parseFloat(s.opacity) : null,
          position: s.position || null,
          transition: s.transition || null,
          animationName: s.animationName || null,
          animationDuration: s.animationDuration || null,
          boxShadow: s.boxShadow || null,
          borderRadius: s.borderRadius || null,
          cursor: s.cursor || null
        };
      }

      function traverse(el, parentId) {
        if (nodes.length >= limit) return null;
        const tag = el.tagName.toLowerCase();
        if (skip.has(tag)) return null;

        const id = `node-${nodeId++}`;
        const rect = el.getBoundingClientRect();
        const attributes = {};
        for (const attr of el.attributes) {
          attributes[attr.name] = attr.value;
        }

        let text = null;
        for (const child of el.childNodes) {
          if (child.nodeType === Node.TEXT_NODE) {
            const trimmed = child.textContent.trim();
            if (trimmed) {
              text = text ? text + ' ' + trimmed : trimmed;
            }
          }
        }

        const entry = {
          id,
          tag,
          children: [],
          parent: parentId,
          attributes,
          text,
          boundingBox: {
            x: rect.x,
            y: rect.y + window.scrollY,
            width: rect.width,
            height: rect.height
          },
          computedStyle: styleInfo(el)
        };
        nodes.push(entry);

        for (const child of el.children) {
          const childId = traverse(child, id);
          if (childId) entry.children.push(childId);
        }
        return id;
      }

      const stylesheets = { hoverRules: 0, focusRules: 0, keyframes: 0, mediaQueries: 0, customProperties: 0 };
      function scan(rules) {
        for (const rule of rules) {
          if (rule.type === CSSRule.MEDIA_RULE) {
            stylesheets.mediaQueries++;
            scan(rule.cssRules);
          } else if (rule.type === CSSRule.KEYFRAMES_RULE) {
            stylesheets.keyframes++;
          } else if (rule.selectorText) {
            if (rule.selectorText.includes(':hover')) stylesheets.hoverRules++;
            if (rule.selectorText.includes(':focus')) stylesheets.focusRules++;
            for (let i = 0; i < rule.style.length; i++) {
              if (rule.style[i].startsWith('--')) stylesheets.customProperties++;
            }
          }
        }
      }
      for (const sheet of document.styleSheets) {
        try {
          scan(sheet.cssRules);
        } catch (_) {
          // Cross-origin sheets are not readable.
        }
      }

      traverse(document.body, null);

      return {
        url: window.location.href,
        title: document.title,
        nodes,
        meta: Array.from(document.querySelectorAll('meta')).map((m) => ({
          name: m.getAttribute('name'),
          property: m.getAttribute('property'),
          content: m.getAttribute('content')
        })),
        scripts: Array.from(document.scripts).map((s) => s.src).filter(Boolean),
        stylesheets
      };
    }, parseInt(maxNodes, 10));

    console.log(JSON.stringify({ status: 'ok', dom, screenshot }));
  } catch (err) {
    const message = err && err.message ? err.message : String(err);
    console.error(JSON.stringify({ status: 'error', message }));
    process.exitCode = 1;
  } finally {
    if (browser) {
      await browser.close();
    }
  }
}

run();
"#;

/// Upper bound for the `node --version` and `require('playwright')` probes.
pub(crate) const NODE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

const PLAYWRIGHT_CHECK_SCRIPT: &str = "require('playwright'); process.stdout.write('ok');";

const MISSING_PLAYWRIGHT: &str =
    "Playwright npm package is missing; install with `npm install playwright`.";

/// `{"status":"error","message":...}` as printed by the capture script.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ScriptError {
    pub status: String,
    pub message: String,
}

pub(crate) fn map_spawn_error(err: io::Error, command: &str) -> WfaError {
    match err.kind() {
        io::ErrorKind::NotFound => WfaError::render(format!(
            "Unable to spawn Playwright helper; '{command}' was not found on PATH"
        )),
        _ => WfaError::Io(err),
    }
}

fn missing_module(lower: &str) -> bool {
    lower.contains("cannot find module 'playwright'")
}

/// Classifies a failed helper run from its stderr.
pub(crate) fn map_playwright_error(status_text: impl Into<String>, stderr: &str) -> WfaError {
    let stderr = stderr.trim();
    if let Ok(script) = serde_json::from_str::<ScriptError>(stderr) {
        return map_playwright_status_error(&script.status, script.message);
    }

    let lower = stderr.to_ascii_lowercase();
    if missing_module(&lower) {
        WfaError::render(MISSING_PLAYWRIGHT)
    } else if lower.contains("timeout") {
        WfaError::render(
            "Playwright timed out; raise timeouts.navigation, timeouts.network_idle or timeouts.process in the config file.",
        )
    } else {
        WfaError::render(format!(
            "Playwright exited with status {}: {stderr}",
            status_text.into()
        ))
    }
}

pub(crate) fn map_playwright_status_error(status: &str, message: String) -> WfaError {
    let lower = message.to_ascii_lowercase();
    if missing_module(&lower) {
        return WfaError::render(MISSING_PLAYWRIGHT);
    }
    let hint = if lower.contains("timeout") {
        ". Hint: raise timeouts.navigation or timeouts.network_idle in the config file."
    } else {
        ""
    };
    WfaError::render(format!("Playwright error (status {status}): {message}{hint}"))
}

/// Runs a short node command and returns its output, bounded by [`NODE_CHECK_TIMEOUT`].
async fn probe(node_command: &str, args: &[&str], what: &str) -> Result<std::process::Output> {
    let mut cmd = Command::new(node_command);
    cmd.args(args).stdout(Stdio::null()).stderr(Stdio::piped());

    match tokio::time::timeout(NODE_CHECK_TIMEOUT, cmd.output()).await {
        Ok(output) => output.map_err(|err| map_spawn_error(err, node_command)),
        Err(_) => Err(WfaError::render(format!(
            "Timed out checking {what} availability after {NODE_CHECK_TIMEOUT:?}"
        ))),
    }
}

pub(crate) async fn ensure_node_available(node_command: &str) -> Result<()> {
    let output = probe(node_command, &["--version"], "node").await?;
    if output.status.success() {
        Ok(())
    } else {
        Err(WfaError::render(format!(
            "Node command {node_command:?} is not available (exit {})",
            output.status
        )))
    }
}

pub(crate) async fn ensure_playwright_available(node_command: &str) -> Result<()> {
    let output = probe(node_command, &["-e", PLAYWRIGHT_CHECK_SCRIPT], "Playwright").await?;
    if output.status.success() {
        return Ok(());
    }
    Err(map_playwright_error(
        output.status.to_string(),
        &String::from_utf8_lossy(&output.stderr),
    ))
}
