pub mod assessment_dto;
pub mod candidate_dto;
pub mod interview_dto;
pub mod interviewer_dto;
pub mod response_dto;
