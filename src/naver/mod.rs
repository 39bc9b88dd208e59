//! 네이버 지도 장소 목록 크롤러
//!
//! 목록 페이지를 넘기며 장소마다 이름, 업종, 주소, 썸네일을 읽는다.

mod crawler;
mod image;

pub use crawler::NaverPlaceCrawler;
pub use image::{decode_data_uri, upscale_thumbnail_url};
