//! Share link construction. The canonical post URL comes from
//! `PUBLIC_ORIGIN`, the intent URLs are the documented entry points of
//! each network.

use std::fmt::Write;

use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize, JsonSchema)]
pub struct ShareLinks {
	/// The canonical URL of the post.
	pub url: String,
	pub twitter: String,
	pub linkedin: String,
	pub facebook: String,
}

pub fn share_links(origin: &str, post_id: Uuid, title: &str) -> ShareLinks {
	let url = format!("{origin}/community/post/{post_id}");
	let encoded_url = encode_component(&url);
	let text = encode_component(&format!("Check out this post on Rencontre: {title}"));

	ShareLinks {
		twitter: format!("https://twitter.com/intent/tweet?text={text}&url={encoded_url}"),
		linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={encoded_url}"),
		facebook: format!("https://www.facebook.com/sharer/sharer.php?u={encoded_url}"),
		url,
	}
}

/// Percent-encodes everything outside the set `encodeURIComponent` leaves
/// intact, so the links match what the networks expect byte for byte.
fn encode_component(input: &str) -> String {
	let mut out = String::with_capacity(input.len());

	for byte in input.bytes() {
		match byte {
			b'A'..=b'Z'
			| b'a'..=b'z'
			| b'0'..=b'9'
			| b'-'
			| b'_'
			| b'.'
			| b'~'
			| b'!'
			| b'*'
			| b'\''
			| b'('
			| b')' => out.push(byte as char),
			_ => {
				let _ = write!(out, "%{byte:02X}");
			}
		}
	}

	out
}
