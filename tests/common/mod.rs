#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use chrono::NaiveDate;
use serde_json::Value;

use campus_server::cache::{ObjectCache, object_cache::moka::MokaCacheWrapper};
use campus_server::config::AppConfig;
use campus_server::models::courses::requests::CreateCourseRequest;
use campus_server::models::departments::requests::CreateDepartmentRequest;
use campus_server::models::faculties::requests::CreateFacultyRequest;
use campus_server::models::lecturers::requests::NewLecturer;
use campus_server::models::programs::{entities::ProgramLevel, requests::CreateProgramRequest};
use campus_server::models::students::requests::NewStudent;
use campus_server::models::users::entities::UserRole;
use campus_server::models::users::requests::NewUser;
use campus_server::runtime::lifetime::startup::seed_admin;
use campus_server::storage::{
    CourseStorage, DepartmentStorage, FacultyStorage, LecturerStorage, ProgramStorage,
    SeaOrmStorage, Storage, StudentStorage, UserStorage,
};
use campus_server::utils::password::hash_password;

pub const PASSWORD: &str = "Str0ngPassw0rd";

/// 登录并取出 access token Cookie
#[macro_export]
macro_rules! session {
    ($app:expr, $state:expr, $email:expr, $password:expr) => {{
        let login = actix_web::test::call_service(
            &$app,
            $state.login_request(&$email, &$password).to_request(),
        )
        .await;
        assert_eq!(login.status(), actix_web::http::StatusCode::OK, "login failed");
        $crate::common::cookie(&login, "accessToken").expect("access cookie")
    }};
}

/// 组装与服务器一致的测试应用
#[macro_export]
macro_rules! campus_app {
    ($storage:expr, $cache:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(campus_server::middlewares::RequestId)
                .configure(campus_server::configure_app(
                    $storage.clone(),
                    $cache.clone(),
                    campus_server::models::AppStartTime {
                        start_datetime: chrono::Utc::now(),
                    },
                )),
        )
        .await
    };
}

/// 院系、专业、课程以及一名讲师和一名学生
pub struct Campus {
    pub department_id: i64,
    pub program_id: i64,
    /// 另一个专业，用于跨专业校验
    pub other_program_id: i64,
    pub course_id: i64,
    pub lecturer_id: i64,
    pub student_id: i64,
}

pub struct TestState {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    /// 每个测试使用独立的来源地址，避免共享限流计数
    pub ip: String,
}

static NEXT_IP: AtomicU32 = AtomicU32::new(1);

/// 内存 SQLite + Moka 缓存，写入默认管理员
pub async fn setup() -> TestState {
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::in_memory()
            .await
            .expect("in-memory database should migrate"),
    );
    seed_admin(&storage).await;

    let cache: Arc<dyn ObjectCache> =
        Arc::new(MokaCacheWrapper::new().expect("moka cache should build"));

    let n = NEXT_IP.fetch_add(1, Ordering::SeqCst);
    TestState {
        storage,
        cache,
        ip: format!("10.{}.{}.{}", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff),
    }
}

impl TestState {
    pub fn admin_email(&self) -> String {
        AppConfig::get().app.admin_email.to_lowercase()
    }

    pub fn admin_password(&self) -> String {
        AppConfig::get().app.admin_password.clone()
    }

    pub async fn create_user(&self, email: &str, role: UserRole) -> i64 {
        let user = self
            .storage
            .create_user(NewUser {
                email: email.to_string(),
                password_hash: hash_password(PASSWORD).expect("hash"),
                role,
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                phone: None,
                gender: None,
                date_of_birth: None,
            })
            .await
            .expect("user should be created");
        user.user.id
    }

    pub async fn create_student(&self, email: &str, program_id: i64, number: &str) -> i64 {
        let user_id = self.create_user(email, UserRole::Student).await;
        self.storage
            .create_student(NewStudent {
                user_id,
                student_number: number.to_string(),
                program_id,
                admission_date: NaiveDate::from_ymd_opt(2025, 9, 1).expect("date"),
                year_of_study: 1,
            })
            .await
            .expect("student should be created");
        user_id
    }

    /// 直接经存储层写入基础数据
    pub async fn seed_campus(&self) -> Campus {
        let faculty = self
            .storage
            .create_faculty(CreateFacultyRequest {
                code: "FET".to_string(),
                name: "Engineering and Technology".to_string(),
                description: None,
                dean_id: None,
            })
            .await
            .expect("faculty");
        let department = self
            .storage
            .create_department(CreateDepartmentRequest {
                faculty_id: faculty.id,
                code: "ICT".to_string(),
                name: "Information Technology".to_string(),
                description: None,
                head_id: None,
            })
            .await
            .expect("department");

        let mut programs = Vec::new();
        for (code, name) in [("DIT", "Diploma in IT"), ("DBM", "Diploma in Business")] {
            let program = self
                .storage
                .create_program(CreateProgramRequest {
                    department_id: department.id,
                    code: code.to_string(),
                    name: name.to_string(),
                    level: ProgramLevel::Diploma,
                    duration_years: 2,
                    description: None,
                })
                .await
                .expect("program");
            programs.push(program.id);
        }

        let lecturer_id = self.create_user("lecturer@campus.local", UserRole::Lecturer).await;
        self.storage
            .create_lecturer(NewLecturer {
                user_id: lecturer_id,
                staff_number: "LEC/0001".to_string(),
                department_id: department.id,
                specialization: None,
                hire_date: None,
            })
            .await
            .expect("lecturer");

        let course = self
            .storage
            .create_course(CreateCourseRequest {
                program_id: programs[0],
                lecturer_id: Some(lecturer_id),
                code: "DIT101".to_string(),
                title: "Introduction to Programming".to_string(),
                description: None,
                credits: 3,
                semester: 1,
            })
            .await
            .expect("course");

        let student_id = self
            .create_student("student@campus.local", programs[0], "DIT/0001/2025")
            .await;

        Campus {
            department_id: department.id,
            program_id: programs[0],
            other_program_id: programs[1],
            course_id: course.id,
            lecturer_id,
            student_id,
        }
    }

    pub fn json(&self, method: Method, uri: &str, session: &Cookie<'static>, body: Value) -> TestRequest {
        self.request()
            .method(method)
            .uri(uri)
            .cookie(session.clone())
            .set_json(body)
    }

    pub fn get(&self, uri: &str, session: &Cookie<'static>) -> TestRequest {
        self.request().uri(uri).cookie(session.clone())
    }

    pub fn delete(&self, uri: &str, session: &Cookie<'static>) -> TestRequest {
        self.request()
            .method(Method::DELETE)
            .uri(uri)
            .cookie(session.clone())
    }

    pub fn request(&self) -> TestRequest {
        TestRequest::default().insert_header(("X-Forwarded-For", self.ip.as_str()))
    }

    pub fn login_request(&self, email: &str, password: &str) -> TestRequest {
        self.request()
            .method(actix_web::http::Method::POST)
            .uri("/api/v1/auth/login")
            .set_json(serde_json::json!({ "email": email, "password": password }))
    }
}

pub fn cookie<B>(response: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

/// 发送请求，返回状态码与 JSON 响应体
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, req).await;
    let status = response.status();
    let body = test::read_body(response).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

pub fn field<'a>(body: &'a Value, path: &[&str]) -> &'a Value {
    path.iter().fold(body, |value, key| &value[*key])
}
