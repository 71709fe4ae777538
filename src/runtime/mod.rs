//! 运行时生命周期：启动准备与关闭信号

pub mod lifetime {
    pub mod shutdown;
    pub mod startup;
}
