use axum::extract::State;
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path, Session},
	model::UserType,
	openapi::tag,
	Database,
};

use super::{model, Error, RouteError};

/// List submitted applications
/// Returns the authenticated applicant's applications, newest first, with
/// the listing each was submitted to.
#[route(tag = tag::APPLICATION)]
pub async fn get_my_applications(
	State(database): State<Database>,
	session: Session,
) -> Result<Json<Vec<model::SubmittedApplication>>, RouteError> {
	match session.user.user_type {
		UserType::Applicant => {}
		UserType::Employer => return Err(Error::NotAnApplicant.into()),
	}

	let applicant_id =
		sqlx::query_scalar::<_, Uuid>("SELECT id FROM applicant_profile WHERE user_id = $1")
			.bind(session.user.id)
			.fetch_optional(&database)
			.await?
			.ok_or(Error::NoApplicantProfile)?;

	let applications = sqlx::query_as::<_, model::SubmittedApplication>(
		r"
			SELECT
				a.id, a.job_id, a.status, a.cover_letter, a.created_at,
				j.title AS job_title,
				j.company_name,
				j.position_type,
				j.salary_range,
				j.status AS job_status
			FROM application a
			JOIN job_listing j ON j.id = a.job_id
			WHERE a.applicant_id = $1
			ORDER BY a.created_at DESC
		",
	)
	.bind(applicant_id)
	.fetch_all(&database)
	.await?;

	Ok(Json(applications))
}

/// List received applications
/// Returns every application across the authenticated employer's listings,
/// newest first, with the listing and the applicant joined in.
#[route(tag = tag::APPLICATION)]
pub async fn get_received_applications(
	State(database): State<Database>,
	session: Session,
) -> Result<Json<Vec<model::ReceivedApplication>>, RouteError> {
	match session.user.user_type {
		UserType::Employer => {}
		UserType::Applicant => return Err(Error::NotAnEmployer.into()),
	}

	// One round trip for the whole dashboard.
	let applications = sqlx::query_as::<_, model::ReceivedApplication>(
		r"
			SELECT
				a.id, a.job_id, a.status, a.cover_letter, a.created_at,
				j.title AS job_title,
				acc.full_name AS applicant_name,
				acc.email AS applicant_email,
				p.skills, p.experience_years, p.resume_url
			FROM application a
			JOIN job_listing j ON j.id = a.job_id
			JOIN applicant_profile p ON p.id = a.applicant_id
			JOIN account acc ON acc.id = p.user_id
			WHERE j.employer_id = (SELECT id FROM employer_profile WHERE user_id = $1)
			ORDER BY a.created_at DESC
		",
	)
	.bind(session.user.id)
	.fetch_all(&database)
	.await?;

	Ok(Json(applications))
}

/// Review application
/// Moves an application on one of the authenticated employer's listings to
/// a new status.
#[route(tag = tag::APPLICATION)]
pub async fn set_application_status(
	State(database): State<Database>,
	session: Session,
	Path(application_id): Path<Uuid>,
	Json(input): Json<model::StatusInput>,
) -> Result<Json<model::Application>, RouteError> {
	let application = sqlx::query_as::<_, model::Application>(
		r"
			UPDATE application
			SET status = $1
			WHERE id = $2
				AND job_id IN (
					SELECT id FROM job_listing
					WHERE employer_id = (SELECT id FROM employer_profile WHERE user_id = $3)
				)
			RETURNING *
		",
	)
	.bind(input.status)
	.bind(application_id)
	.bind(session.user.id)
	.fetch_optional(&database)
	.await?;

	Ok(Json(
		application.ok_or(Error::UnknownApplication(application_id))?,
	))
}
