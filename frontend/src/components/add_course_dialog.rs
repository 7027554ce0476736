use learn164_shared::NewCourse;
use leptos::prelude::*;

use crate::components::icons::Plus;

/// 添加课程对话框
///
/// 学科 id 来自当前路由，不在表单里选。提交后拼好
/// [`NewCourse`] 交给父组件，由父组件调接口并更新列表。
#[component]
pub fn AddCourseDialog(
    genre_id: Option<i64>,
    #[prop(into)] on_add: Callback<NewCourse>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // open 信号与 <dialog> 元素状态同步
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_add.run(NewCourse {
            title: title.get(),
            description: description.get(),
            genre_id,
        });
        set_open.set(false);
        set_title.set(String::new());
        set_description.set(String::new());
    };

    view! {
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" />
            "Добавить курс"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Добавить новый курс"</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label for="course_title" class="label">
                            <span class="label-text">"Название курса"</span>
                        </label>
                        <input
                            id="course_title"
                            required
                            type="text"
                            placeholder="Алгебра, 9 класс"
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                            prop:value=title
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="course_description" class="label">
                            <span class="label-text">"Описание курса"</span>
                        </label>
                        <textarea
                            id="course_description"
                            required
                            placeholder="Краткое описание курса"
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                            prop:value=description
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>
                            "Отмена"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            "Сохранить"
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
