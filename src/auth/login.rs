use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Form, response::Redirect};
use axum_extra::extract::PrivateCookieJar;
use diesel::prelude::*;
use hypertext::prelude::*;
use serde::Deserialize;

use crate::{
    auth::{User, set_login_cookie},
    schema::users,
    state::Conn,
    template::Page,
    util_resp::{FailureResponse, StandardResponse, bad_request, success},
    widgets::alert::ErrorAlert,
};

pub async fn login_page(user: Option<User<false>>) -> StandardResponse {
    if user.is_some() {
        return bad_request(
            Page::new()
                .user_opt(user)
                .body(maud! {
                    ErrorAlert
                        msg = "You are already logged in, so cannot log in!";
                })
                .render(),
        );
    }

    success(
        Page::new()
            .user_opt(user)
            .body(maud! {
                h1 { "Login" }
                form method="post" class="mt-4" {
                    div class="mb-3" {
                        label for="id" class="form-label" { "Email or username" }
                        input type="text" class="form-control" id="id" name="id";
                    }
                    div class="mb-3" {
                        label for="password" class="form-label" { "Password" }
                        input type="password" class="form-control" id="password" name="password";
                    }
                    button type="submit" class="btn btn-primary" { "Submit" }
                }
            })
            .render(),
    )
}

#[derive(Deserialize)]
pub struct LoginForm {
    id: String,
    password: String,
}

pub async fn do_login(
    mut conn: Conn<true>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(PrivateCookieJar, Redirect), FailureResponse> {
    let user = match users::table
        .filter(users::email.eq(&form.id).or(users::username.eq(&form.id)))
        .first::<User<true>>(&mut *conn)
        .optional()
        .unwrap()
    {
        Some(user) => user,
        None => {
            return Err(FailureResponse::BadRequest(
                Page::<_, true>::new()
                    .body(maud! {
                        ErrorAlert
                            msg = "No such user exists. Please return to the
                                   previous page and try again.";
                    })
                    .render(),
            ));
        }
    };

    let parsed_hash = PasswordHash::new(&user.password_hash).unwrap();
    if Argon2::default()
        .verify_password(form.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        // todo: password rate limiting
        return Err(FailureResponse::BadRequest(
            Page::<_, true>::new()
                .body(maud! {
                    ErrorAlert msg =
                        "Incorrect password. Please return to the previous page
                         and try again.";
                })
                .render(),
        ));
    }

    Ok((set_login_cookie(user.id, jar), Redirect::to("/")))
}
