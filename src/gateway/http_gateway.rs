use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{
    AssessmentGateway, CandidateGateway, Confirmed, InterviewGateway, InterviewerGateway,
    InterviewerPage,
};
use crate::config::Config;
use crate::dto::assessment_dto::NewAssessment;
use crate::dto::candidate_dto::{CandidateForm, CandidateUpdate};
use crate::dto::interview_dto::ScheduleInterview;
use crate::dto::interviewer_dto::InterviewerForm;
use crate::dto::response_dto::{
    AssessmentCreatedResponse, AssessmentDeletedResponse, CandidateCreatedResponse,
    CandidateListResponse, ErrorBody, InterviewListResponse, InterviewScheduledResponse,
    InterviewerCreatedResponse, InterviewerListResponse, MessageResponse,
};
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::models::interviewer::Interviewer;
use crate::models::{AssessmentId, CandidateId, InterviewerId};
use crate::utils::files::FileUpload;

/// `reqwest`-backed gateway speaking the backend's JSON and multipart dialect.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            warn!(%status, ?message, "Backend rejected request");
            return Err(Error::Api { status, message });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn multipart(
        fields: Vec<(&'static str, String)>,
        file: Option<(&'static str, &FileUpload)>,
    ) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        if let Some((name, upload)) = file {
            let part = Part::bytes(upload.bytes.to_vec())
                .file_name(upload.file_name.clone())
                .mime_str(&upload.mime_type)?;
            form = form.part(name, part);
        }
        Ok(form)
    }
}

#[async_trait]
impl CandidateGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let url = self.endpoint("candidates")?;
        let body: CandidateListResponse = self.send(self.client.get(url)).await?;
        debug!(count = body.candidates.len(), "Fetched candidates");
        Ok(body.candidates)
    }

    #[instrument(skip(self))]
    async fn search_candidates(&self, query: &str) -> Result<Vec<Candidate>> {
        let mut url = self.endpoint("candidates")?;
        url.query_pairs_mut().append_pair("search", query);
        let body: CandidateListResponse = self.send(self.client.get(url)).await?;
        debug!(count = body.candidates.len(), "Searched candidates");
        Ok(body.candidates)
    }

    #[instrument(skip(self), fields(candidate_id = %id))]
    async fn get_candidate(&self, id: &CandidateId) -> Result<Candidate> {
        let url = self.endpoint(&format!("candidates/{id}"))?;
        self.send(self.client.get(url)).await
    }

    #[instrument(skip(self, form), fields(email = %form.profile.email))]
    async fn create_candidate(&self, form: CandidateForm) -> Result<Confirmed<Option<Candidate>>> {
        let url = self.endpoint("candidates")?;
        let multipart = Self::multipart(form.profile.text_fields(), Some(("cvFile", &form.cv_file)))?;
        let body: CandidateCreatedResponse =
            self.send(self.client.post(url).multipart(multipart)).await?;
        Ok(Confirmed::new(body.message, body.candidate))
    }

    #[instrument(skip(self, update), fields(candidate_id = %id))]
    async fn update_candidate(
        &self,
        id: &CandidateId,
        update: CandidateUpdate,
    ) -> Result<Confirmed<()>> {
        let url = self.endpoint(&format!("candidates/{id}"))?;
        let request = match &update.cv_file {
            Some(cv) => {
                let multipart = Self::multipart(update.text_fields(), Some(("cvFile", cv)))?;
                self.client.put(url).multipart(multipart)
            }
            None => self.client.put(url).json(&update),
        };
        let body: MessageResponse = self.send(request).await?;
        Ok(Confirmed::new(body.message, ()))
    }

    #[instrument(skip(self), fields(candidate_id = %id))]
    async fn delete_candidate(&self, id: &CandidateId) -> Result<Confirmed<()>> {
        let url = self.endpoint(&format!("candidates/{id}"))?;
        let body: MessageResponse = self.send(self.client.delete(url)).await?;
        Ok(Confirmed::new(body.message, ()))
    }
}

#[async_trait]
impl InterviewerGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_interviewers(&self) -> Result<InterviewerPage> {
        let url = self.endpoint("interviewer")?;
        let body: InterviewerListResponse = self.send(self.client.get(url)).await?;
        Ok(InterviewerPage {
            interviewers: body.interviewers,
            total: body.total,
        })
    }

    #[instrument(skip(self), fields(interviewer_id = %id))]
    async fn get_interviewer(&self, id: &InterviewerId) -> Result<Interviewer> {
        let url = self.endpoint(&format!("interviewer/{id}"))?;
        self.send(self.client.get(url)).await
    }

    #[instrument(skip(self, form))]
    async fn create_interviewer(
        &self,
        form: InterviewerForm,
    ) -> Result<Confirmed<Option<Interviewer>>> {
        let url = self.endpoint("interviewer")?;
        let body: InterviewerCreatedResponse = self.send(self.client.post(url).json(&form)).await?;
        Ok(Confirmed::new(body.message, body.interviewer))
    }

    #[instrument(skip(self, form), fields(interviewer_id = %id))]
    async fn update_interviewer(
        &self,
        id: &InterviewerId,
        form: InterviewerForm,
    ) -> Result<Confirmed<()>> {
        let url = self.endpoint(&format!("interviewer/{id}"))?;
        let body: MessageResponse = self.send(self.client.put(url).json(&form)).await?;
        Ok(Confirmed::new(body.message, ()))
    }

    #[instrument(skip(self), fields(interviewer_id = %id))]
    async fn delete_interviewer(&self, id: &InterviewerId) -> Result<Confirmed<()>> {
        let url = self.endpoint(&format!("interviewer/{id}"))?;
        let body: MessageResponse = self.send(self.client.delete(url)).await?;
        Ok(Confirmed::new(body.message, ()))
    }
}

#[async_trait]
impl InterviewGateway for HttpGateway {
    #[instrument(skip(self, request), fields(candidate_id = %request.candidate_id, stage = %request.stage))]
    async fn schedule_interview(&self, request: ScheduleInterview) -> Result<Confirmed<Interview>> {
        let url = self.endpoint("interviews/schedule")?;
        let body: InterviewScheduledResponse =
            self.send(self.client.post(url).json(&request)).await?;
        Ok(Confirmed::new(body.message, body.interview))
    }

    #[instrument(skip(self), fields(candidate_id = %candidate_id))]
    async fn list_candidate_interviews(&self, candidate_id: &CandidateId) -> Result<Vec<Interview>> {
        let url = self.endpoint(&format!("interviews/candidate/{candidate_id}"))?;
        let body: InterviewListResponse = self.send(self.client.get(url)).await?;
        Ok(body.interviews)
    }
}

#[async_trait]
impl AssessmentGateway for HttpGateway {
    #[instrument(skip(self, request), fields(candidate_id = %request.candidate_id))]
    async fn create_assessment(&self, request: NewAssessment) -> Result<Confirmed<Assessment>> {
        let url = self.endpoint("assessments")?;
        let file = request.test_file.as_ref().map(|f| ("testFile", f));
        let multipart = Self::multipart(request.text_fields(), file)?;
        let body: AssessmentCreatedResponse =
            self.send(self.client.post(url).multipart(multipart)).await?;
        Ok(Confirmed::new(body.message, body.assessment))
    }

    #[instrument(skip(self), fields(candidate_id = %candidate_id))]
    async fn list_candidate_assessments(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Assessment>> {
        let url = self.endpoint(&format!("assessments/candidate/{candidate_id}"))?;
        self.send(self.client.get(url)).await
    }

    #[instrument(skip(self), fields(assessment_id = %id))]
    async fn delete_assessment(&self, id: &AssessmentId) -> Result<Confirmed<AssessmentId>> {
        let url = self.endpoint(&format!("assessments/{id}"))?;
        let body: AssessmentDeletedResponse = self.send(self.client.delete(url)).await?;
        Ok(Confirmed::new(body.message, body.id.unwrap_or_else(|| id.clone())))
    }
}
