use argon2::Argon2;
use argon2::PasswordHasher;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use axum::{Form, response::Redirect};
use chrono::Utc;
use diesel::{insert_into, prelude::*};
use hypertext::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::validation::*;
use crate::widgets::alert::ErrorAlert;
use crate::{
    auth::User,
    schema::users,
    state::Conn,
    template::Page,
    util_resp::{StandardResponse, bad_request, see_other_ok, success},
};

pub async fn register_page(user: Option<User<false>>) -> StandardResponse {
    if user.is_some() {
        return see_other_ok(Redirect::to("/"));
    }

    success(
        Page::<_, false>::new()
            .body(maud! {
                h1 { "Register" }
                form method="post" class="mt-4" {
                    div class="mb-3" {
                        label for="username" class="form-label" { "Username" }
                        input type="text" class="form-control" id="username" name="username";
                    }
                    div class="mb-3" {
                        label for="email" class="form-label" { "Email" }
                        input type="email" class="form-control" id="email" name="email";
                    }
                    div class="mb-3" {
                        label for="password" class="form-label" { "Password" }
                        input type="password" class="form-control" id="password" name="password";
                    }
                    div class="mb-3" {
                        label for="password2" class="form-label" { "Confirm Password" }
                        input type="password" class="form-control" id="password2" name="password2";
                    }
                    button type="submit" class="btn btn-primary" { "Register" }
                }
            })
            .render(),
    )
}

fn acceptable_password(password: &str, confirmation: &str) -> bool {
    password.len() >= 6 && password == confirmation
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

pub async fn do_register(
    user: Option<User<true>>,
    mut conn: Conn<true>,
    Form(form): Form<RegisterForm>,
) -> StandardResponse {
    if user.is_some() {
        return see_other_ok(Redirect::to("/"));
    }

    if let Err(e) = is_ascii_no_spaces(&form.username) {
        return bad_request(maud! { p { "Username " (e) } }.render());
    }
    if let Err(e) = is_valid_email(&form.email) {
        return bad_request(maud! { p { (e) } }.render());
    }
    if !acceptable_password(&form.password, &form.password2) {
        return bad_request(
            maud! {
                p { "Passwords must be at least 6 characters and match." }
            }
            .render(),
        );
    }

    let existing = users::table
        .filter(
            users::username
                .eq(&form.username)
                .or(users::email.eq(&form.email)),
        )
        .first::<User<true>>(&mut *conn)
        .optional()
        .unwrap();

    match existing {
        Some(user) => {
            let is_email_problem = user.email == form.email;

            bad_request(
                Page::<_, true>::new()
                    .body(maud! {
                        div class="alert alert-danger" role="alert" {
                            @if is_email_problem {
                                "That email is already taken"
                            } @else {
                                "That username is already taken"
                            }

                            ". Please return to the previous page and try again."
                        }
                    })
                    .render(),
            )
        }
        None => {
            let salt = SaltString::generate(&mut OsRng);

            let argon2 = Argon2::default();

            let password_hash = argon2
                .hash_password(form.password.as_bytes(), &salt)
                .unwrap()
                .to_string();

            insert_into(users::table)
                .values((
                    users::id.eq(Uuid::now_v7().to_string()),
                    users::email.eq(&form.email),
                    users::username.eq(&form.username),
                    users::password_hash.eq(password_hash),
                    users::created_at.eq(Utc::now().naive_utc()),
                ))
                .execute(&mut *conn)
                .unwrap();

            see_other_ok(Redirect::to("/login"))
        }
    }
}
