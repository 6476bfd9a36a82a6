//! Fire-and-forget texture fetching.
//!
//! Each image is fetched and decoded off the frame loop; finished images are
//! queued and uploaded by the next frame. A failed load is logged and the
//! face keeps its placeholder.

use crate::constants::MAX_TEXTURE_EDGE;
use crate::mips::{build_mip_chain, MipLevel};
use pack_core::{TextureId, TextureRegistry, TextureSource};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct DecodedTexture {
    pub id: TextureId,
    /// Base level first, down to 1x1.
    pub levels: Vec<MipLevel>,
}

impl DecodedTexture {
    pub fn size(&self) -> (u32, u32) {
        self.levels.first().map_or((0, 0), |l| (l.width, l.height))
    }
}

pub type UploadQueue = Rc<RefCell<Vec<DecodedTexture>>>;

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch failed: {:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a Response: {:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let promise = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("array_buffer: {:?}", e))?;
    let buf = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("array_buffer: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

fn decode(id: TextureId, bytes: &[u8]) -> anyhow::Result<DecodedTexture> {
    let mut img = image::load_from_memory(bytes)?;
    if img.width() > MAX_TEXTURE_EDGE || img.height() > MAX_TEXTURE_EDGE {
        img = img.resize(
            MAX_TEXTURE_EDGE,
            MAX_TEXTURE_EDGE,
            image::imageops::FilterType::Triangle,
        );
    }
    Ok(DecodedTexture {
        id,
        levels: build_mip_chain(img.to_rgba8()),
    })
}

async fn load(id: TextureId, url: String) -> anyhow::Result<DecodedTexture> {
    let bytes = fetch_bytes(&url).await?;
    decode(id, &bytes)
}

/// Start loading every URL texture in `registry`; results land in `queue`.
pub fn spawn_loads(registry: &TextureRegistry, queue: &UploadQueue) {
    for (id, source) in registry.iter() {
        let TextureSource::Url(url) = source else {
            continue;
        };
        let url = url.clone();
        let queue = queue.clone();
        spawn_local(async move {
            match load(id, url.clone()).await {
                Ok(tex) => {
                    let (w, h) = tex.size();
                    log::info!("[texture] loaded {} ({}x{})", url, w, h);
                    queue.borrow_mut().push(tex);
                }
                Err(e) => log::warn!("[texture] {} failed, keeping placeholder: {:?}", url, e),
            }
        });
    }
}
