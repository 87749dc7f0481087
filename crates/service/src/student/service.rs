use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use models::student;

use crate::course::repository::CourseRepository;
use crate::domain::{AuditInfo, Student, StudentInput};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::student::repository::StudentRepository;

/// Student use cases: CRUD, name search and course enrollment.
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { students, courses }
    }

    pub async fn find_all(&self, page: Option<&PageRequest>) -> Result<Vec<Student>, ServiceError> {
        self.students.find_all(page).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Student, ServiceError> {
        self.students.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("student", id))
    }

    /// Students whose name contains `fragment`, ignoring case.
    pub async fn find_by_name_like(&self, fragment: &str) -> Result<Vec<Student>, ServiceError> {
        self.students.find_by_name_like(fragment).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn save(&self, input: StudentInput) -> Result<Student, ServiceError> {
        student::validate_name(&input.name)?;
        let created = self.students.insert(&input, AuditInfo::stamped(Utc::now())).await?;
        info!(id = created.id, "created student");
        Ok(created)
    }

    /// Full replace of an existing student. A missing id is an error, never an insert.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: StudentInput) -> Result<Student, ServiceError> {
        student::validate_name(&input.name)?;
        let existing = self.find_by_id(id).await?;
        let audit = existing.audit.touched(Utc::now());
        let updated = self
            .students
            .replace(id, &input, audit)
            .await?
            .ok_or_else(|| ServiceError::not_found("student", id))?;
        info!(id, "updated student");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.students.delete(id).await? {
            return Err(ServiceError::not_found("student", id));
        }
        info!(id, "deleted student");
        Ok(())
    }

    /// Enroll a student in a course. Enrolling twice leaves one enrollment.
    #[instrument(skip(self))]
    pub async fn enroll(&self, student_id: i32, course_id: i32) -> Result<Student, ServiceError> {
        self.find_by_id(student_id).await?;
        if !self.courses.exists(course_id).await? {
            return Err(ServiceError::not_found("course", course_id));
        }
        if self.students.enroll(student_id, course_id).await? {
            info!(student_id, course_id, "enrolled student");
        }
        self.find_by_id(student_id).await
    }

    #[instrument(skip(self))]
    pub async fn unenroll(&self, student_id: i32, course_id: i32) -> Result<(), ServiceError> {
        if !self.students.unenroll(student_id, course_id).await? {
            return Err(ServiceError::NotFound(format!(
                "student {} is not enrolled in course {}",
                student_id, course_id
            )));
        }
        info!(student_id, course_id, "unenrolled student");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseInput;
    use crate::pagination::SortKey;
    use crate::test_support::get_services;

    fn named(name: &str) -> StudentInput { StudentInput { name: name.to_string() } }

    #[tokio::test]
    async fn student_crud_service() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let students = &svc.students;

        let ada = students.save(named("Ada")).await?;
        assert!(ada.id > 0);
        assert_eq!(ada.audit.created_at, ada.audit.updated_at);

        let found = students.find_by_id(ada.id).await?;
        assert_eq!(found.name, "Ada");
        assert_eq!(found.audit, ada.audit);
        assert!(found.courses.is_empty());

        let updated = students.update(ada.id, named("Ada Lovelace")).await?;
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.audit.created_at, ada.audit.created_at);
        assert!(updated.audit.updated_at >= ada.audit.updated_at);

        students.delete(ada.id).await?;
        let after = students.find_by_id(ada.id).await;
        assert!(matches!(after, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        assert!(matches!(svc.students.find_by_id(4242).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.students.update(4242, named("Ghost")).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.students.delete(4242).await, Err(ServiceError::NotFound(_))));
        // update never creates
        assert!(svc.students.find_all(None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let err = svc.students.save(named("  ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        Ok(())
    }

    #[tokio::test]
    async fn name_like_is_case_insensitive_substring() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        for n in ["John Smith", "Anna SMITHSON", "Blacksmith", "Jane Doe", "Smyth"] {
            svc.students.save(named(n)).await?;
        }
        let mut names: Vec<String> = svc.students.find_by_name_like("Smith").await?.into_iter().map(|s| s.name).collect();
        names.sort();
        assert_eq!(names, vec!["Anna SMITHSON", "Blacksmith", "John Smith"]);

        assert!(svc.students.find_by_name_like("zzz").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn name_like_treats_wildcards_literally() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        svc.students.save(named("100% Sure")).await?;
        svc.students.save(named("1000 Sure")).await?;
        let hits = svc.students.find_by_name_like("0%").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "100% Sure");
        Ok(())
    }

    #[tokio::test]
    async fn paging_windows_and_multi_key_sort() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        for n in ["Cleo", "Abe", "Bea", "Abe", "Dan"] {
            svc.students.save(named(n)).await?;
        }

        let first = PageRequest::new(0, 3, vec![SortKey::asc("name"), SortKey::desc("id")])?;
        let page: Vec<(String, i32)> = svc.students.find_all(Some(&first)).await?.into_iter().map(|s| (s.name, s.id)).collect();
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].0, "Abe");
        assert_eq!(page[1].0, "Abe");
        assert!(page[0].1 > page[1].1);
        assert_eq!(page[2].0, "Bea");

        let second = PageRequest::new(1, 3, vec![SortKey::asc("name")])?;
        let names: Vec<String> = svc.students.find_all(Some(&second)).await?.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Cleo", "Dan"]);

        let beyond = PageRequest::new(5, 3, vec![])?;
        assert!(svc.students.find_all(Some(&beyond)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_sort_property_is_validation_error() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let page = PageRequest::new(0, 3, vec![SortKey::asc("password")])?;
        assert!(matches!(svc.students.find_all(Some(&page)).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn enrollment_lifecycle() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let ada = svc.students.save(named("Ada")).await?;
        let math = svc.courses.save(CourseInput { name: "Math".into(), instructor_id: None }).await?;

        let enrolled = svc.students.enroll(ada.id, math.id).await?;
        assert_eq!(enrolled.courses.len(), 1);
        assert_eq!(enrolled.courses[0].name, "Math");

        // idempotent
        let again = svc.students.enroll(ada.id, math.id).await?;
        assert_eq!(again.courses.len(), 1);

        assert!(matches!(svc.students.enroll(ada.id, 999).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.students.enroll(999, math.id).await, Err(ServiceError::NotFound(_))));

        svc.students.unenroll(ada.id, math.id).await?;
        assert!(svc.students.find_by_id(ada.id).await?.courses.is_empty());
        assert!(matches!(svc.students.unenroll(ada.id, math.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_enrolls_of_same_pair_all_succeed() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let ada = svc.students.save(named("Ada")).await?;
        let math = svc.courses.save(CourseInput { name: "Math".into(), instructor_id: None }).await?;

        for _ in 0..10 {
            let (a, b) = tokio::join!(svc.students.enroll(ada.id, math.id), svc.students.enroll(ada.id, math.id));
            assert_eq!(a?.courses.len(), 1);
            assert_eq!(b?.courses.len(), 1);
        }
        let counts = svc.courses.count_students_in_courses().await?;
        assert_eq!(counts[0].student_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_student_removes_enrollments() -> Result<(), anyhow::Error> {
        let svc = get_services().await?;
        let ada = svc.students.save(named("Ada")).await?;
        let math = svc.courses.save(CourseInput { name: "Math".into(), instructor_id: None }).await?;
        svc.students.enroll(ada.id, math.id).await?;

        svc.students.delete(ada.id).await?;

        let course = svc.courses.find_by_id(math.id).await?;
        assert!(course.students.is_empty());
        let counts = svc.courses.count_students_in_courses().await?;
        assert_eq!(counts[0].student_count, 0);
        Ok(())
    }
}
