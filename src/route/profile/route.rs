use axum::extract::State;
use macros::route;

use crate::{
	extract::{Json, Session},
	model::{split_list, UserType},
	openapi::tag,
	Database,
};

use super::{model, Error, RouteError};

/// Get applicant profile
/// Returns the authenticated account's applicant profile.
#[route(tag = tag::PROFILE)]
pub async fn get_applicant_profile(
	State(database): State<Database>,
	session: Session,
) -> Result<Json<model::ApplicantProfile>, RouteError> {
	let profile = sqlx::query_as::<_, model::ApplicantProfile>(
		"SELECT * FROM applicant_profile WHERE user_id = $1",
	)
	.bind(session.user.id)
	.fetch_optional(&database)
	.await?;

	Ok(Json(profile.ok_or(Error::ProfileNotFound)?))
}

/// Save applicant profile
/// Creates the authenticated account's applicant profile, or replaces it if
/// one already exists.
#[route(tag = tag::PROFILE)]
pub async fn put_applicant_profile(
	State(database): State<Database>,
	session: Session,
	Json(input): Json<model::CreateApplicantProfileInput>,
) -> Result<Json<model::ApplicantProfile>, RouteError> {
	match session.user.user_type {
		UserType::Applicant => {}
		UserType::Employer => return Err(Error::NotAnApplicant.into()),
	}

	let profile = sqlx::query_as::<_, model::ApplicantProfile>(
		r"
			INSERT INTO applicant_profile (
				user_id, skills, experience_years, position_type,
				resume_url, portfolio_url, github_url, linkedin_url, available
			)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
			ON CONFLICT (user_id) DO UPDATE SET
				skills = EXCLUDED.skills,
				experience_years = EXCLUDED.experience_years,
				position_type = EXCLUDED.position_type,
				resume_url = EXCLUDED.resume_url,
				portfolio_url = EXCLUDED.portfolio_url,
				github_url = EXCLUDED.github_url,
				linkedin_url = EXCLUDED.linkedin_url,
				available = EXCLUDED.available,
				updated_at = now()
			RETURNING *
		",
	)
	.bind(session.user.id)
	.bind(split_list(&input.skills))
	.bind(input.experience_years)
	.bind(input.position_type)
	.bind(&input.resume_url)
	.bind(&input.portfolio_url)
	.bind(&input.github_url)
	.bind(&input.linkedin_url)
	.bind(input.available)
	.fetch_one(&database)
	.await?;

	Ok(Json(profile))
}

/// Get employer profile
/// Returns the authenticated account's employer profile.
#[route(tag = tag::PROFILE)]
pub async fn get_employer_profile(
	State(database): State<Database>,
	session: Session,
) -> Result<Json<model::EmployerProfile>, RouteError> {
	let profile = sqlx::query_as::<_, model::EmployerProfile>(
		"SELECT * FROM employer_profile WHERE user_id = $1",
	)
	.bind(session.user.id)
	.fetch_optional(&database)
	.await?;

	Ok(Json(profile.ok_or(Error::ProfileNotFound)?))
}

/// Save employer profile
/// Creates the authenticated account's employer profile, or replaces it if
/// one already exists.
#[route(tag = tag::PROFILE)]
pub async fn put_employer_profile(
	State(database): State<Database>,
	session: Session,
	Json(input): Json<model::CreateEmployerProfileInput>,
) -> Result<Json<model::EmployerProfile>, RouteError> {
	match session.user.user_type {
		UserType::Employer => {}
		UserType::Applicant => return Err(Error::NotAnEmployer.into()),
	}

	let profile = sqlx::query_as::<_, model::EmployerProfile>(
		r"
			INSERT INTO employer_profile (
				user_id, company_name, website, size,
				logo_url, description, industry, founded_year
			)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
			ON CONFLICT (user_id) DO UPDATE SET
				company_name = EXCLUDED.company_name,
				website = EXCLUDED.website,
				size = EXCLUDED.size,
				logo_url = EXCLUDED.logo_url,
				description = EXCLUDED.description,
				industry = EXCLUDED.industry,
				founded_year = EXCLUDED.founded_year,
				updated_at = now()
			RETURNING *
		",
	)
	.bind(session.user.id)
	.bind(&input.company_name)
	.bind(&input.website)
	.bind(&input.size)
	.bind(&input.logo_url)
	.bind(&input.description)
	.bind(&input.industry)
	.bind(input.founded_year)
	.fetch_one(&database)
	.await?;

	Ok(Json(profile))
}
