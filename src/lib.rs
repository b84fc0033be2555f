//! chrdlib — chord chart markup parser and layout engine for the Chrd chord
//! editor.
//!
//! A chart is plain text: `#pragma` lines set style and metadata, content
//! lines hold bars of chord symbols separated by barline tokens.
//!
//! # Example
//! ```no_run
//! let chart = "#title Autumn Leaves\n#start\n|: Cm7 F7 | B^7 E^7 :|2";
//! let svg = chrdlib::render_to_svg(chart, 1.0).unwrap();
//! std::fs::write("autumn_leaves.svg", svg).unwrap();
//! ```

pub mod error;
pub mod glyph;
pub mod model;
pub mod renderer;
pub mod tokenizer;

#[cfg(target_os = "android")]
pub mod android;

use std::path::Path;

pub use error::{ChrdError, Diagnostic, Result};
pub use glyph::{map_chord, ChordToken, Modifiers};
pub use model::*;
pub use renderer::{
    render, CommandRecorder, DrawCommand, PageSize, RenderOutput, RenderSession, Surface,
    SvgBuilder,
};
pub use tokenizer::{parse_document, strip_comment, tokenize_line};

/// Contents of a newly created chart.
pub const NEW_DOCUMENT: &str = "#version 0.0.1\n#title\n#author\n#key\n#start";

/// Render a chart to a self-contained SVG string on the default page.
pub fn render_to_svg(text: &str, scale: f64) -> Result<String> {
    render_to_svg_with_output(text, scale).map(|(svg, _)| svg)
}

/// Render a chart to SVG and also return metadata and diagnostics.
pub fn render_to_svg_with_output(text: &str, scale: f64) -> Result<(String, RenderOutput)> {
    let page = PageSize::for_scale(scale);
    let mut svg = SvgBuilder::new(page.width, page.height);
    let output = render(text, scale, &mut svg)?;
    Ok((svg.build(), output))
}

/// Render a chart into a list of drawing commands on the default page.
pub fn render_to_commands(text: &str, scale: f64) -> Result<(RenderOutput, Vec<DrawCommand>)> {
    let page = PageSize::for_scale(scale);
    let mut recorder = CommandRecorder::new(page.width, page.height);
    let output = render(text, scale, &mut recorder)?;
    Ok((output, recorder.into_commands()))
}

/// Read a chart file and render it to SVG.
pub fn render_file_to_svg<P: AsRef<Path>>(path: P, scale: f64) -> Result<String> {
    let data = std::fs::read(path)?;
    render_bytes_to_svg(&data, scale)
}

/// Render UTF-8 chart bytes to SVG.
pub fn render_bytes_to_svg(data: &[u8], scale: f64) -> Result<String> {
    let text = std::str::from_utf8(data)?;
    render_to_svg(text, scale)
}

/// Convert a render output to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn output_to_json(output: &RenderOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

fn ffi_scale(scale: f64) -> f64 {
    if scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Render chart text and return SVG as a C string.
/// The caller must free the returned string with `chrdlib_free_string`.
///
/// Pass 0.0 as `scale` to use the default of 1.
///
/// # Safety
/// `text` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chrdlib_render_svg(text: *const c_char, scale: f64) -> *mut c_char {
    if text.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(text) };
    let text = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match render_to_svg(text, ffi_scale(scale)) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Render a chart file and return SVG as a C string.
/// The caller must free the returned string with `chrdlib_free_string`.
///
/// # Safety
/// `path` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn chrdlib_render_file(path: *const c_char, scale: f64) -> *mut c_char {
    if path.is_null() {
        return std::ptr::null_mut();
    }
    let path = match unsafe { CStr::from_ptr(path) }.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match render_file_to_svg(path, ffi_scale(scale)) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by chrdlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a chrdlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn chrdlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
