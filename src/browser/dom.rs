//! Raw capture-script output and its conversion into [`DomSnapshot`].

use base64::Engine;
use std::collections::HashMap;

use crate::types::{
    BoundingBox, ComputedStyle, Dimensions, DomNode, DomSnapshot, ImageFormat, MetaTag, Screenshot,
    StylesheetSignals,
};
use crate::{Result, WfaError};

/// Raw script result from the capture script.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CaptureResult {
    pub status: String,
    pub dom: Option<RawDomSnapshot>,
    /// Base64 PNG of the viewport, when requested.
    pub screenshot: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDomSnapshot {
    pub url: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub nodes: Vec<RawDomNode>,
    #[serde(default)]
    pub meta: Vec<RawMeta>,
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub stylesheets: StylesheetSignals,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDomNode {
    pub id: String,
    pub tag: String,
    #[serde(default)]
    pub children: Vec<String>,
    pub parent: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    pub text: Option<String>,
    pub bounding_box: RawBoundingBox,
    pub computed_style: Option<ComputedStyle>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawBoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// `getAttribute` returns null for absent attributes.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawMeta {
    pub name: Option<String>,
    pub property: Option<String>,
    pub content: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Converts raw DOM data from Playwright into the application's DomSnapshot type.
pub(crate) fn convert_raw_dom(dom_data: RawDomSnapshot) -> DomSnapshot {
    let nodes: Vec<DomNode> = dom_data
        .nodes
        .into_iter()
        .map(|raw| DomNode {
            id: raw.id,
            tag: raw.tag.to_ascii_lowercase(),
            children: raw.children,
            parent: raw.parent,
            attributes: raw.attributes,
            text: non_empty(raw.text),
            bounding_box: BoundingBox {
                x: raw.bounding_box.x,
                y: raw.bounding_box.y,
                width: raw.bounding_box.width,
                height: raw.bounding_box.height,
            },
            computed_style: raw.computed_style,
        })
        .collect();

    let meta = dom_data
        .meta
        .into_iter()
        .filter(|m| m.name.is_some() || m.property.is_some())
        .map(|m| MetaTag {
            name: non_empty(m.name).map(|n| n.to_ascii_lowercase()),
            property: non_empty(m.property),
            content: m.content,
        })
        .collect();

    DomSnapshot {
        url: dom_data.url,
        title: non_empty(dom_data.title),
        nodes,
        meta,
        scripts: dom_data.scripts,
        stylesheets: dom_data.stylesheets,
    }
}

/// Wrap base64 image data, reading its format and size from the header.
pub(crate) fn screenshot_from_base64(data: String) -> Result<Screenshot> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| WfaError::render(format!("Screenshot is not valid base64: {}", e)))?;
    screenshot_from_bytes(&bytes, data)
}

/// Encode raw image bytes (PNG or JPEG) as a [`Screenshot`].
pub(crate) fn screenshot_from_image_bytes(bytes: &[u8]) -> Result<Screenshot> {
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    screenshot_from_bytes(bytes, data)
}

fn screenshot_from_bytes(bytes: &[u8], data: String) -> Result<Screenshot> {
    let format = match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => ImageFormat::Png,
        Ok(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
        Ok(other) => {
            return Err(WfaError::render(format!(
                "Unsupported screenshot format {:?}",
                other
            )))
        }
        Err(e) => return Err(WfaError::render(format!("Unreadable screenshot: {}", e))),
    };
    let img = image::load_from_memory(bytes)
        .map_err(|e| WfaError::render(format!("Failed to decode screenshot: {}", e)))?;
    Ok(Screenshot {
        data,
        format,
        dimensions: Dimensions {
            width: img.width(),
            height: img.height(),
        },
    })
}
