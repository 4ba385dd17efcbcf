//! Commentary prompt for the multimodal model.
//!
//! The dashboard's audience reads Traditional Chinese, so the prompt asks for
//! the answer in that language.

use crate::ThumbnailRecord;

/// CTR (percent) below which the model is asked for fixes instead of strengths.
pub const DEFAULT_LOW_CTR_THRESHOLD: f64 = 5.0;

/// Appended when the thumbnail could not be downloaded and only metadata is sent.
pub const TEXT_ONLY_NOTE: &str = "(注意：無法直接讀取圖片檔案，請根據標題與數據進行分析)";

/// Build the commentary prompt for one record.
pub fn build_prompt(record: &ThumbnailRecord, low_ctr_threshold: f64, image_attached: bool) -> String {
    let mut prompt = format!(
        "請分析這張 YouTube 縮圖的成效表現。\n\
         \n\
         影片資訊：\n\
         標題: \"{title}\"\n\
         CTR (點閱率): {ctr}%\n\
         演算法評級: {rating}\n\
         觀看次數: {views}\n\
         \n\
         請提供以下繁體中文分析：\n\
         1. 簡短分析為何這張縮圖會有這樣的成效表現（高 CTR 或 低 CTR）。\n\
         2. 如果 CTR 偏低 (<{t}%)，請給出 3 個具體的改進建議；如果 CTR 很高 (>{t}%)，請列出 3 個值得保持的關鍵優點。\n\
         3. 評論標題與視覺圖像之間的關聯性與吸引力。\n",
        title = record.title,
        ctr = record.ctr,
        rating = record.rating,
        views = record.views,
        t = low_ctr_threshold,
    );

    if !image_attached {
        prompt.push('\n');
        prompt.push_str(TEXT_ONLY_NOTE);
    }

    prompt
}
