use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use models::course;

use crate::course::repository::CourseRepository;
use crate::domain::{AuditInfo, Course, CourseInput, CourseStudentCount};
use crate::errors::ServiceError;
use crate::instructor::repository::InstructorRepository;
use crate::pagination::PageRequest;

/// Course use cases, including the per-course enrollment count.
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    instructors: Arc<dyn InstructorRepository>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepository>, instructors: Arc<dyn InstructorRepository>) -> Self {
        Self { courses, instructors }
    }

    pub async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Course>, ServiceError> {
        self.courses.find_all(page).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Course, ServiceError> {
        self.courses.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("course", id))
    }

    pub async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Course>, ServiceError> {
        self.courses.find_by_name_like(fragment).await
    }

    async fn check_instructor(&self, input: &CourseInput) -> Result<(), ServiceError> {
        if let Some(instructor_id) = input.instructor_id {
            if !self.instructors.exists(instructor_id).await? {
                return Err(ServiceError::not_found("instructor", instructor_id));
            }
        }
        Ok(())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save(&self, input: CourseInput) -> Result<Course, ServiceError> {
        course::validate_name(&input.name)?;
        self.check_instructor(&input).await?;
        let created = self.courses.insert(&input, AuditInfo::stamped(Utc::now())).await?;
        info!(id = created.id, "created course");
        Ok(created)
    }

    /// Full replace: an absent `instructor_id` detaches the instructor.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: CourseInput) -> Result<Course, ServiceError> {
        course::validate_name(&input.name)?;
        let existing = self.find_by_id(id).await?;
        self.check_instructor(&input).await?;
        let audit = existing.audit.touched(Utc::now());
        let updated = self
            .courses
            .replace(id, &input, audit)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", id))?;
        info!(id, "updated course");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.courses.delete(id).await? {
            return Err(ServiceError::not_found("course", id));
        }
        info!(id, "deleted course");
        Ok(())
    }

    pub async fn count_students_in_courses(&self) -> Result<Vec<CourseStudentCount>, ServiceError> {
        self.courses.count_students().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstructorInput, StudentInput};
    use crate::test_support::get_services;

    fn course(name: &str, instructor_id: Option<i32>) -> CourseInput {
        CourseInput { name: name.to_string(), instructor_id }
    }

    #[tokio::test]
    async fn course_crud_service() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let chef = svc.instructors.save(InstructorInput { name: "Mr. Hollandaise".into() }).await?;

        let c = svc.courses.save(course("Cooking", Some(chef.id))).await?;
        assert_eq!(c.instructor.as_ref().map(|i| i.id), Some(chef.id));

        let found = svc.courses.find_by_id(c.id).await?;
        assert_eq!(found.name, "Cooking");
        assert_eq!(found.instructor.map(|i| i.name), Some("Mr. Hollandaise".to_string()));

        // full replace clears the omitted instructor
        let updated = svc.courses.update(c.id, course("Advanced Cooking", None)).await?;
        assert_eq!(updated.name, "Advanced Cooking");
        assert!(updated.instructor.is_none());

        svc.courses.delete(c.id).await?;
        assert!(matches!(svc.courses.find_by_id(c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_instructor_is_not_found() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let err = svc.courses.save(course("Ghost Studies", Some(77))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m.contains("instructor 77")));
        assert!(svc.courses.find_all(None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_course_names_id() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let err = svc.courses.delete(99999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m.contains("99999")));
        Ok(())
    }

    #[tokio::test]
    async fn student_counts_include_empty_courses() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let math = svc.courses.save(course("Math", None)).await?;
        let art = svc.courses.save(course("Art", None)).await?;
        let music = svc.courses.save(course("Music", None)).await?;

        let mut enrollments = 0;
        for (name, courses) in [("Ada", vec![math.id, art.id]), ("Bob", vec![math.id]), ("Cy", vec![])] {
            let s = svc.students.save(StudentInput { name: name.into() }).await?;
            for c in courses {
                svc.students.enroll(s.id, c).await?;
                enrollments += 1;
            }
        }

        let counts = svc.courses.count_students_in_courses().await?;
        assert_eq!(counts.len(), 3);
        let by_id: Vec<(i32, &str, i64)> = counts.iter().map(|c| (c.course_id, c.course_name.as_str(), c.student_count)).collect();
        assert_eq!(by_id, vec![(math.id, "Math", 2), (art.id, "Art", 1), (music.id, "Music", 0)]);
        assert_eq!(counts.iter().map(|c| c.student_count).sum::<i64>(), enrollments);
        Ok(())
    }

    #[tokio::test]
    async fn course_lists_its_students() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let math = svc.courses.save(course("Math", None)).await?;
        let bob = svc.students.save(StudentInput { name: "Bob".into() }).await?;
        let ada = svc.students.save(StudentInput { name: "Ada".into() }).await?;
        svc.students.enroll(ada.id, math.id).await?;
        svc.students.enroll(bob.id, math.id).await?;

        let found = svc.courses.find_by_id(math.id).await?;
        let ids: Vec<i32> = found.students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![bob.id, ada.id]);

        let matches = svc.courses.find_by_name_like("MAT").await?;
        assert_eq!(matches.len(), 1);
        Ok(())
    }
}
