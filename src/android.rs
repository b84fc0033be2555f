//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jstring};
use jni::JNIEnv;

use crate::{render_file_to_svg, render_to_svg};

fn scale_or_default(scale: jfloat) -> f64 {
    if scale > 0.0 {
        scale as f64
    } else {
        1.0
    }
}

fn into_jstring(env: &mut JNIEnv, result: crate::Result<String>) -> jstring {
    match result {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render chart text to SVG.
///
/// Called from Kotlin as:
///   external fun renderSvg(text: String, scale: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_chrd_app_ChrdLib_renderSvg(
    mut env: JNIEnv,
    _class: JClass,
    text: JString,
    scale: jfloat,
) -> jstring {
    let text: String = match env.get_string(&text) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_to_svg(&text, scale_or_default(scale));
    into_jstring(&mut env, result)
}

/// Render the chart file at `path` to SVG.
///
/// Called from Kotlin as:
///   external fun renderFile(path: String, scale: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_chrd_app_ChrdLib_renderFile(
    mut env: JNIEnv,
    _class: JClass,
    path: JString,
    scale: jfloat,
) -> jstring {
    let path: String = match env.get_string(&path) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_file_to_svg(&path, scale_or_default(scale));
    into_jstring(&mut env, result)
}
