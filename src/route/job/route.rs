use axum::extract::State;
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path, Query, Session},
	model::{split_list, JobStatus, UserType},
	openapi::tag,
	route::application,
	Database,
};

use super::{model, Error, RouteError};

/// List open jobs
/// Returns every open listing, newest first. Closed listings are never
/// included, regardless of filters.
#[route(tag = tag::JOB)]
pub async fn get_jobs(
	State(database): State<Database>,
	Query(filter): Query<model::JobFilter>,
) -> Result<Json<Vec<model::JobListing>>, RouteError> {
	let jobs = sqlx::query_as::<_, model::JobListing>(
		r"
			SELECT * FROM job_listing
			WHERE status = 'open'
				AND ($1::position_type IS NULL OR position_type = $1)
				AND (
					$2::text IS NULL
					OR title ILIKE '%' || $2 || '%'
					OR company_name ILIKE '%' || $2 || '%'
					OR description ILIKE '%' || $2 || '%'
				)
			ORDER BY created_at DESC
		",
	)
	.bind(filter.position_type)
	.bind(&filter.search)
	.fetch_all(&database)
	.await?;

	Ok(Json(jobs))
}

/// Post job
/// Posts a new listing under the authenticated employer's company.
#[route(tag = tag::JOB)]
pub async fn create_job(
	State(database): State<Database>,
	session: Session,
	Json(input): Json<model::CreateJobListingInput>,
) -> Result<Json<model::JobListing>, RouteError> {
	match session.user.user_type {
		UserType::Employer => {}
		UserType::Applicant => return Err(Error::NotAnEmployer.into()),
	}

	let employer = sqlx::query_as::<_, (Uuid, String)>(
		"SELECT id, company_name FROM employer_profile WHERE user_id = $1",
	)
	.bind(session.user.id)
	.fetch_optional(&database)
	.await?;

	let Some((employer_id, company_name)) = employer else {
		return Err(Error::NoEmployerProfile.into());
	};

	let job = sqlx::query_as::<_, model::JobListing>(
		r"
			INSERT INTO job_listing (
				employer_id, title, description, position_type,
				required_skills, salary_range, experience_required,
				company_name, status
			)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
			RETURNING *
		",
	)
	.bind(employer_id)
	.bind(&input.title)
	.bind(&input.description)
	.bind(input.position_type)
	.bind(split_list(&input.required_skills))
	.bind(&input.salary_range)
	.bind(&input.experience_required)
	.bind(&company_name)
	.bind(input.status)
	.fetch_one(&database)
	.await?;

	Ok(Json(job))
}

/// List own jobs
/// Returns the authenticated employer's listings, open and closed, newest
/// first.
#[route(tag = tag::JOB)]
pub async fn get_my_jobs(
	State(database): State<Database>,
	session: Session,
) -> Result<Json<Vec<model::JobListing>>, RouteError> {
	match session.user.user_type {
		UserType::Employer => {}
		UserType::Applicant => return Err(Error::NotAnEmployer.into()),
	}

	let jobs = sqlx::query_as::<_, model::JobListing>(
		r"
			SELECT * FROM job_listing
			WHERE employer_id = (SELECT id FROM employer_profile WHERE user_id = $1)
			ORDER BY created_at DESC
		",
	)
	.bind(session.user.id)
	.fetch_all(&database)
	.await?;

	Ok(Json(jobs))
}

/// Get single job
/// Returns a single listing. Authenticated applicants also receive a hint
/// describing whether they can apply.
#[route(tag = tag::JOB)]
pub async fn get_job(
	State(database): State<Database>,
	session: Option<Session>,
	Path(job_id): Path<Uuid>,
) -> Result<Json<model::JobDetails>, RouteError> {
	let job = sqlx::query_as::<_, model::JobListing>("SELECT * FROM job_listing WHERE id = $1")
		.bind(job_id)
		.fetch_optional(&database)
		.await?;

	let job = job.ok_or(Error::UnknownJob(job_id))?;

	let viewer = match session {
		Some(session) if session.user.user_type == UserType::Applicant => {
			Some(eligibility(&database, job.id, session.user.id).await?)
		}
		_ => None,
	};

	Ok(Json(model::JobDetails { job, viewer }))
}

async fn eligibility(
	database: &Database,
	job_id: Uuid,
	user_id: Uuid,
) -> Result<model::Eligibility, RouteError> {
	let applicant =
		sqlx::query_scalar::<_, Uuid>("SELECT id FROM applicant_profile WHERE user_id = $1")
			.bind(user_id)
			.fetch_optional(database)
			.await?;

	let Some(applicant_id) = applicant else {
		return Ok(model::Eligibility::ProfileRequired);
	};

	let applied = sqlx::query_scalar::<_, bool>(
		"SELECT EXISTS (SELECT 1 FROM application WHERE job_id = $1 AND applicant_id = $2)",
	)
	.bind(job_id)
	.bind(applicant_id)
	.fetch_one(database)
	.await?;

	Ok(if applied {
		model::Eligibility::AlreadyApplied
	} else {
		model::Eligibility::CanApply
	})
}

/// Update job
/// Updates one of the authenticated employer's listings, including the
/// open/closed toggle. Fields left out keep their current value. Closed
/// listings disappear from the public board.
#[route(tag = tag::JOB)]
pub async fn update_job(
	State(database): State<Database>,
	session: Session,
	Path(job_id): Path<Uuid>,
	Json(input): Json<model::UpdateJobListingInput>,
) -> Result<Json<model::JobListing>, RouteError> {
	let job = sqlx::query_as::<_, model::JobListing>(
		r"
			UPDATE job_listing
			SET
				title = COALESCE($1, title),
				description = COALESCE($2, description),
				position_type = COALESCE($3, position_type),
				required_skills = COALESCE($4, required_skills),
				salary_range = COALESCE($5, salary_range),
				experience_required = COALESCE($6, experience_required),
				status = COALESCE($7, status)
			WHERE id = $8
				AND employer_id = (SELECT id FROM employer_profile WHERE user_id = $9)
			RETURNING *
		",
	)
	.bind(&input.title)
	.bind(&input.description)
	.bind(input.position_type)
	.bind(input.required_skills.as_deref().map(split_list))
	.bind(&input.salary_range)
	.bind(&input.experience_required)
	.bind(input.status)
	.bind(job_id)
	.bind(session.user.id)
	.fetch_optional(&database)
	.await?;

	Ok(Json(job.ok_or(Error::UnknownJob(job_id))?))
}

/// Apply to job
/// Submits an application to an open listing. Each applicant can apply to
/// a listing at most once.
#[route(tag = tag::JOB)]
pub async fn apply(
	State(database): State<Database>,
	session: Session,
	Path(job_id): Path<Uuid>,
	Json(input): Json<model::ApplyInput>,
) -> Result<Json<application::model::Application>, RouteError> {
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

	let status = sqlx::query_scalar::<_, JobStatus>("SELECT status FROM job_listing WHERE id = $1")
		.bind(job_id)
		.fetch_optional(&database)
		.await?
		.ok_or(Error::UnknownJob(job_id))?;

	if status != JobStatus::Open {
		return Err(Error::JobClosed.into());
	}

	let application = sqlx::query_as::<_, application::model::Application>(
		r"
			INSERT INTO application (job_id, applicant_id, cover_letter)
			VALUES ($1, $2, $3)
			RETURNING *
		",
	)
	.bind(job_id)
	.bind(applicant_id)
	.bind(&input.cover_letter)
	.fetch_one(&database)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d)
			if d.constraint() == Some("application_job_id_applicant_id_key") =>
		{
			Error::AlreadyApplied.into()
		}
		e => RouteError::from(e),
	})?;

	Ok(Json(application))
}
