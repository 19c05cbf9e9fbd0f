use aide::{
	openapi::{ApiKeyLocation, SecurityScheme, Tag},
	transform::TransformOpenApi,
};

use crate::{error, extract::Json, session};

pub const SECURITY_SCHEME_SESSION: &str = "Session";

pub mod tag {
	pub const AUTH: &str = "Auth";
	pub const PROFILE: &str = "Profile";
	pub const JOB: &str = "Job";
	pub const APPLICATION: &str = "Application";
	pub const COMMUNITY: &str = "Community";
	pub const CONNECTION: &str = "Connection";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Rencontre API")
		.summary("A job board with a community attached")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::AUTH.into(),
			description: Some("Accounts and sessions".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::PROFILE.into(),
			description: Some("Applicant and employer profiles".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::JOB.into(),
			description: Some("Job listings".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::APPLICATION.into(),
			description: Some("Job applications".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::COMMUNITY.into(),
			description: Some("Community posts, comments and likes".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::CONNECTION.into(),
			description: Some("Connections between accounts".into()),
			..Default::default()
		})
		.security_scheme(
			SECURITY_SCHEME_SESSION,
			SecurityScheme::ApiKey {
				location: ApiKeyLocation::Cookie,
				name: session::COOKIE_NAME.into(),
				description: Some("A user session cookie".into()),
				extensions: Default::default(),
			},
		)
		.default_response_with::<Json<error::ErrorResponse<'static>>, _>(|res| {
			res.example(error::ErrorResponse {
				success: false,
				errors: error::Message::new("error message")
					.field("optional field")
					.into_vec(),
			})
		})
}
